//! Compiler from movement notation to [`MovementDescriptor`].
//!
//! Parsing runs textual expansion passes first (arrow sets, range-capture
//! clauses, abbreviations, `Q`) and then tokenizes and folds the result.

use crate::core::error::NotationError;
use crate::core::{Direction, Offset};
use crate::BOARD_SIZE;

use super::{CompoundMove, MovementDescriptor, Range};

/// Parses a movement notation into a normalized descriptor.
///
/// The result depends only on the input text, so descriptors may be cached
/// per species.
///
/// # Examples
///
/// ```
/// use taikyoku::movement::{parse, Range};
/// use taikyoku::Direction;
///
/// let lance = parse("fR").unwrap();
/// assert_eq!(Some(Range::Unlimited), lance.slide_range(Direction::F));
/// assert_eq!(None, lance.slide_range(Direction::B));
///
/// let err = parse("fX").unwrap_err();
/// assert_eq!(
///     "Error parsing Betza notation fX: \"X\" is not a valid character",
///     err.to_string()
/// );
/// ```
pub fn parse(notation: &str) -> Result<MovementDescriptor, NotationError> {
    let mut arrow_dirs = Vec::new();
    let text = expand_arrows(notation, notation, &mut arrow_dirs)?;
    let text = collapse_range_captures(&text);
    let text = expand_abbreviations(&text);
    let text = expand_compound_slides(&text);

    let tokens = tokenize(&text, notation)?;
    let mut movement = parse_tokens(&tokens, notation)?;
    movement.triple_slashed_arrow_dirs = arrow_dirs;

    Ok(movement)
}

// ============================================================================
// Textual expansion passes
// ============================================================================

/// Slide template substituted for each direction of an arrow set.
fn arrow_template(d: Direction) -> &'static str {
    match d {
        Direction::F => "fR",
        Direction::FR => "frB",
        Direction::R => "rR",
        Direction::BR => "brB",
        Direction::B => "bR",
        Direction::BL => "blB",
        Direction::L => "lR",
        Direction::FL => "flB",
    }
}

/// Replaces every `{D1,D2,...}>` with the slide templates of its directions
/// and records the directions.
///
/// A brace group that is not followed by `>` is left alone and rejected by
/// the tokenizer.
fn expand_arrows(
    text: &str,
    notation: &str,
    dirs: &mut Vec<Direction>,
) -> Result<String, NotationError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let end = match after.find('}') {
            Some(end) if after[end + 1..].starts_with('>') => end,
            _ => {
                out.push('{');
                rest = after;
                continue;
            }
        };

        for name in after[..end].split(',') {
            let d = Direction::from_name(name).ok_or_else(|| NotationError::InvalidArrowDirection {
                name: name.to_string(),
                notation: notation.to_string(),
            })?;
            if !dirs.contains(&d) {
                dirs.push(d);
            }
            out.push_str(arrow_template(d));
        }

        rest = &after[end + 2..];
    }
    out.push_str(rest);

    Ok(out)
}

/// Replaces `((cXcdX)-X)` with `X`.
fn collapse_range_captures(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if let Some(atom) = range_capture_at(&chars[i..]) {
            out.push(atom);
            i += 11;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}

fn range_capture_at(chars: &[char]) -> Option<char> {
    match *chars {
        ['(', '(', 'c', x, 'c', 'd', y, ')', '-', z, ')', ..]
            if x.is_ascii_uppercase() && x == y && x == z =>
        {
            Some(x)
        }
        _ => None,
    }
}

fn expand_abbreviations(text: &str) -> String {
    text.replace('B', "FF").replace('R', "WW").replace('K', "WF")
}

/// Expands `<mods>Q<digit>` into `<mods>F<digit><mods>W<digit>` and a bare
/// `<mods>Q` into `<mods>FF<mods>WW`.
fn expand_compound_slides(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != 'Q' {
            out.push(c);
            continue;
        }

        let split = out
            .char_indices()
            .rev()
            .take_while(|(_, ch)| ch.is_ascii_lowercase())
            .last()
            .map_or(out.len(), |(i, _)| i);
        let mods = out.split_off(split);

        match chars.peek().copied().filter(char::is_ascii_digit) {
            Some(range) => {
                chars.next();
                out.push_str(&format!("{mods}F{range}{mods}W{range}"));
            }
            None => out.push_str(&format!("{mods}FF{mods}WW")),
        }
    }

    out
}

// ============================================================================
// Tokens
// ============================================================================

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Atom {
    Orthogonal,
    Diagonal,
    Leaper(Offset),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Token {
    Atom(Atom),
    Modifier(char),
    Digit(u8),
    Open,
    Close,
    Hyphen,
}

fn base_atom(c: char) -> Option<Atom> {
    let leaper = |dx, dy| Some(Atom::Leaper(Offset::new(dx, dy)));
    match c {
        'W' => Some(Atom::Orthogonal),
        'F' => Some(Atom::Diagonal),
        'D' => leaper(2, 0),
        'N' => leaper(2, 1),
        'A' => leaper(2, 2),
        'H' => leaper(3, 0),
        'C' => leaper(3, 1),
        'Z' => leaper(3, 2),
        'G' => leaper(3, 3),
        _ => None,
    }
}

const MODIFIERS: &str = "fblrsvca";

fn tokenize(text: &str, notation: &str) -> Result<Vec<Token>, NotationError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let token = match c {
            '(' if starts_offset(&chars[i + 1..]) => {
                let (offset, len) = read_offset(&chars[i..], notation)?;
                i += len;
                tokens.push(Token::Atom(Atom::Leaper(offset)));
                continue;
            }
            '(' => Token::Open,
            ')' => Token::Close,
            '-' => Token::Hyphen,
            '0'..='9' => Token::Digit(c as u8 - b'0'),
            _ if MODIFIERS.contains(c) => Token::Modifier(c),
            _ => match base_atom(c) {
                Some(atom) => Token::Atom(atom),
                None => {
                    return Err(NotationError::InvalidCharacter {
                        character: c,
                        notation: notation.to_string(),
                    })
                }
            },
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

fn starts_offset(rest: &[char]) -> bool {
    match rest {
        [d, ..] if d.is_ascii_digit() => true,
        ['-', d, ..] => d.is_ascii_digit(),
        _ => false,
    }
}

/// Reads `(dx,dy)` at the start of `chars`, returning the offset and the
/// number of characters consumed.
fn read_offset(chars: &[char], notation: &str) -> Result<(Offset, usize), NotationError> {
    let close = chars.iter().position(|&c| c == ')');
    let literal: String = match close {
        Some(close) => chars[..=close].iter().collect(),
        None => chars.iter().collect(),
    };
    let invalid = || NotationError::InvalidOffset {
        literal: literal.clone(),
        notation: notation.to_string(),
    };

    let close = close.ok_or_else(invalid)?;
    let inner = &literal[1..literal.len() - 1];
    let (dx, dy) = inner.split_once(',').ok_or_else(invalid)?;
    let dx: i8 = dx.parse().map_err(|_| invalid())?;
    let dy: i8 = dy.parse().map_err(|_| invalid())?;
    // no leap can leave the board's extent
    let limit = BOARD_SIZE as i8;
    if (dx, dy) == (0, 0) || !(-limit < dx && dx < limit && -limit < dy && dy < limit) {
        return Err(invalid());
    }

    Ok((Offset::new(dx, dy), close + 1))
}

// ============================================================================
// Direction modifiers
// ============================================================================

/// Direction modifiers collected before an atom. Order is irrelevant; only
/// the multiplicity of `f` and `b` matters (`ff` selects narrow leaps).
#[derive(Debug, Default, Clone, Copy)]
struct Modifiers {
    f: u8,
    b: u8,
    l: u8,
    r: u8,
    s: bool,
    v: bool,
}

impl Modifiers {
    fn add(&mut self, c: char) {
        match c {
            'f' => self.f += 1,
            'b' => self.b += 1,
            'l' => self.l += 1,
            'r' => self.r += 1,
            's' => self.s = true,
            'v' => self.v = true,
            // `c` and `a` qualify compound legs, not directions
            _ => {}
        }
    }

    fn is_unrestricted(&self) -> bool {
        self.f == 0 && self.b == 0 && self.l == 0 && self.r == 0 && !self.s && !self.v
    }

    fn allows_orthogonal(&self, d: Direction) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        match d {
            Direction::R => self.s || self.r > 0,
            Direction::L => self.s || self.l > 0,
            Direction::F => self.v || self.f > 0,
            Direction::B => self.v || self.b > 0,
            _ => false,
        }
    }

    /// A diagonal is kept when every named component belongs to it, so `f`
    /// keeps both forward diagonals and `fr` only the forward-right one.
    fn allows_diagonal(&self, d: Direction) -> bool {
        if self.is_unrestricted() || self.s || self.v {
            return true;
        }
        match d {
            Direction::FR => self.b == 0 && self.l == 0,
            Direction::FL => self.b == 0 && self.r == 0,
            Direction::BR => self.f == 0 && self.l == 0,
            Direction::BL => self.f == 0 && self.r == 0,
            _ => false,
        }
    }

    fn allows_offset(&self, o: Offset) -> bool {
        if self.is_unrestricted() {
            return true;
        }

        let (x, y) = (o.dx, o.dy);
        let Some(d) = o.direction() else {
            return false;
        };
        if x == 0 || y == 0 {
            return self.allows_orthogonal(d);
        }
        if x.abs() == y.abs() {
            return self.allows_diagonal(d);
        }

        let narrow = y.abs() > x.abs();
        if (self.v && narrow) || (self.s && !narrow) {
            return true;
        }
        if narrow && ((self.f >= 2 && y > 0) || (self.b >= 2 && y < 0)) {
            return true;
        }

        let single_f = self.f == 1;
        let single_b = self.b == 1;
        if !(single_f || single_b || self.l > 0 || self.r > 0) {
            return false;
        }
        (!single_f || y > 0) && (!single_b || y < 0) && (self.l == 0 || x < 0) && (self.r == 0 || x > 0)
    }
}

/// Returns the distinct rotations and reflections of a leap, in a fixed order.
fn rotations(o: Offset) -> Vec<Offset> {
    let (x, y) = (o.dx, o.dy);
    let candidates = [
        (x, y),
        (x, -y),
        (-x, y),
        (-x, -y),
        (y, x),
        (y, -x),
        (-y, x),
        (-y, -x),
    ];

    let mut out: Vec<Offset> = Vec::with_capacity(8);
    for (dx, dy) in candidates {
        let rot = Offset::new(dx, dy);
        if !out.contains(&rot) {
            out.push(rot);
        }
    }
    out
}

// ============================================================================
// Folding tokens into a descriptor
// ============================================================================

fn parse_tokens(tokens: &[Token], notation: &str) -> Result<MovementDescriptor, NotationError> {
    let mut movement = MovementDescriptor::default();
    let mut compounds = Vec::new();
    let mut modifiers = Modifiers::default();
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            Token::Open => {
                let close = matching_close(tokens, i).ok_or_else(|| unbalanced(notation))?;
                parse_compound(&tokens[i + 1..close], notation, &mut compounds)?;
                modifiers = Modifiers::default();
                i = close + 1;
            }
            Token::Modifier(c) => {
                modifiers.add(c);
                i += 1;
            }
            Token::Atom(atom) => {
                let (range, consumed) = read_range(tokens, i, atom, notation)?;
                add_atom(&mut movement, atom, range, &modifiers);
                modifiers = Modifiers::default();
                i += consumed;
            }
            Token::Close => return Err(unbalanced(notation)),
            Token::Digit(d) => return Err(invalid_character((b'0' + d) as char, notation)),
            Token::Hyphen => return Err(invalid_character('-', notation)),
        }
    }

    movement.compound_moves = merge_compounds(compounds);
    Ok(movement)
}

fn unbalanced(notation: &str) -> NotationError {
    NotationError::UnbalancedBracket {
        notation: notation.to_string(),
    }
}

fn invalid_character(character: char, notation: &str) -> NotationError {
    NotationError::InvalidCharacter {
        character,
        notation: notation.to_string(),
    }
}

fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, t) in tokens.iter().enumerate().skip(open) {
        match t {
            Token::Open => depth += 1,
            Token::Close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Reads the range that follows an atom and the number of tokens it spans.
fn read_range(tokens: &[Token], i: usize, atom: Atom, notation: &str) -> Result<(Range, usize), NotationError> {
    let (range, consumed) = match (tokens.get(i + 1), tokens.get(i + 2)) {
        (Some(Token::Digit(n)), _) => (Range::Limited(*n), 2),
        (Some(Token::Atom(again)), Some(Token::Digit(n))) if *again == atom => {
            (Range::Limited(*n), 3)
        }
        (Some(Token::Atom(again)), _) if *again == atom => (Range::Unlimited, 2),
        _ => (Range::Limited(1), 1),
    };

    if range == Range::Limited(0) {
        return Err(NotationError::ZeroRange {
            notation: notation.to_string(),
        });
    }
    Ok((range, consumed))
}

fn add_atom(movement: &mut MovementDescriptor, atom: Atom, range: Range, modifiers: &Modifiers) {
    match atom {
        Atom::Orthogonal => {
            for d in Direction::ORTHOGONAL {
                if modifiers.allows_orthogonal(d) {
                    movement.add_slide(d, range);
                }
            }
        }
        Atom::Diagonal => {
            for d in Direction::DIAGONAL {
                if modifiers.allows_diagonal(d) {
                    movement.add_slide(d, range);
                }
            }
        }
        // leapers ignore the range
        Atom::Leaper(base) => {
            for rot in rotations(base) {
                if modifiers.allows_offset(rot) {
                    movement.add_jump(rot);
                }
            }
        }
    }
}

/// How the second leg's slides relate to the first leg's direction.
#[derive(Debug, Clone, Copy)]
enum LegFilter {
    Same,
    Perpendicular,
    Any,
}

impl LegFilter {
    fn allows(self, first: Direction, second: Direction) -> bool {
        match self {
            LegFilter::Same => first == second,
            LegFilter::Perpendicular => first.is_perpendicular_to(second),
            LegFilter::Any => true,
        }
    }
}

fn parse_compound(
    inner: &[Token],
    notation: &str,
    compounds: &mut Vec<CompoundMove>,
) -> Result<(), NotationError> {
    let empty_leg = || NotationError::EmptyLeg {
        notation: notation.to_string(),
    };

    let hyphen = top_level_hyphen(inner);
    let (leg1, leg2) = match hyphen {
        Some(h) => (&inner[..h], Some(&inner[h + 1..])),
        None => (inner, None),
    };
    if leg1.is_empty() {
        return Err(empty_leg());
    }

    let can_continue_after_capture = leg1.first() == Some(&Token::Modifier('c'));
    let first = parse_tokens(leg1, notation)?;

    let (second, filter) = match leg2 {
        None => (MovementDescriptor::default(), LegFilter::Any),
        Some(tokens) => {
            let (filter, tokens) = match tokens.first() {
                Some(Token::Modifier('s')) => (LegFilter::Perpendicular, &tokens[1..]),
                Some(Token::Modifier('a')) => (LegFilter::Any, &tokens[1..]),
                _ => (LegFilter::Same, tokens),
            };
            if tokens.is_empty() {
                return Err(empty_leg());
            }
            (parse_tokens(tokens, notation)?, filter)
        }
    };

    for &jump in &first.jumps {
        let jump_dir = jump.direction();
        let mut follow_up = MovementDescriptor::default();
        for (&d, &r) in &second.slides {
            if Some(d) == jump_dir {
                follow_up.add_slide(d, r);
            }
        }

        let mut leap = MovementDescriptor::default();
        leap.add_jump(jump);
        compounds.push(CompoundMove {
            first: leap,
            can_continue_after_capture,
            second: follow_up,
        });
    }

    for (&dir, &range) in &first.slides {
        let mut follow_up = MovementDescriptor::default();
        for (&d, &r) in &second.slides {
            if filter.allows(dir, d) {
                follow_up.add_slide(d, r);
            }
        }

        let mut slide = MovementDescriptor::default();
        slide.add_slide(dir, range);
        compounds.push(CompoundMove {
            first: slide,
            can_continue_after_capture,
            second: follow_up,
        });
    }

    Ok(())
}

fn top_level_hyphen(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, t) in tokens.iter().enumerate() {
        match t {
            Token::Open => depth += 1,
            Token::Close => depth = depth.saturating_sub(1),
            Token::Hyphen if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Merges compound moves that share an identical second leg and capture
/// rule by uniting their first legs.
fn merge_compounds(compounds: Vec<CompoundMove>) -> Vec<CompoundMove> {
    let mut merged: Vec<CompoundMove> = Vec::with_capacity(compounds.len());

    for c in compounds {
        let existing = merged.iter_mut().find(|m| {
            m.second == c.second && m.can_continue_after_capture == c.can_continue_after_capture
        });
        match existing {
            Some(m) => m.first.absorb(&c.first),
            None => merged.push(c),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(m: &MovementDescriptor) -> Vec<(Direction, Range)> {
        m.slides.iter().map(|(&d, &r)| (d, r)).collect()
    }

    fn offsets(pairs: &[(i8, i8)]) -> Vec<Offset> {
        pairs.iter().map(|&(x, y)| Offset::new(x, y)).collect()
    }

    #[test]
    fn single_steps() {
        let pawn = parse("fW").unwrap();
        assert_eq!(vec![(Direction::F, Range::Limited(1))], slides(&pawn));
        assert!(pawn.jumps.is_empty());

        let king = parse("Q2").unwrap();
        assert_eq!(8, king.slides.len());
        assert!(king.slides.values().all(|&r| r == Range::Limited(2)));
    }

    #[test]
    fn abbreviations() {
        let bishop = parse("B").unwrap();
        assert_eq!(
            vec![
                (Direction::FR, Range::Unlimited),
                (Direction::BR, Range::Unlimited),
                (Direction::BL, Range::Unlimited),
                (Direction::FL, Range::Unlimited),
            ],
            slides(&bishop)
        );

        let short_rook = parse("R3").unwrap();
        assert_eq!(4, short_rook.slides.len());
        assert!(short_rook.slides.values().all(|&r| r == Range::Limited(3)));

        assert_eq!(parse("WF").unwrap(), parse("K").unwrap());
        assert_eq!(parse("FFWW").unwrap(), parse("Q").unwrap());
    }

    #[test]
    fn compound_slide_letter_keeps_modifiers() {
        let m = parse("fQ3").unwrap();
        assert_eq!(
            vec![
                (Direction::F, Range::Limited(3)),
                (Direction::FR, Range::Limited(3)),
                (Direction::FL, Range::Limited(3)),
            ],
            slides(&m)
        );
    }

    #[test]
    fn orthogonal_modifiers() {
        let cases = [
            ("fR", vec![Direction::F]),
            ("vR", vec![Direction::F, Direction::B]),
            ("sR", vec![Direction::R, Direction::L]),
            ("lW", vec![Direction::L]),
            ("bW", vec![Direction::B]),
        ];
        for (notation, expected) in cases {
            let m = parse(notation).unwrap();
            let dirs: Vec<_> = m.slides.keys().copied().collect();
            assert_eq!(expected, dirs, "{notation}");
        }
    }

    #[test]
    fn diagonal_modifiers() {
        let cases = [
            ("fF", vec![Direction::FR, Direction::FL]),
            ("frF", vec![Direction::FR]),
            ("rfF", vec![Direction::FR]),
            ("rF", vec![Direction::FR, Direction::BR]),
            ("bB", vec![Direction::BR, Direction::BL]),
            ("sF", Direction::DIAGONAL.to_vec()),
        ];
        for (notation, expected) in cases {
            let m = parse(notation).unwrap();
            let mut dirs: Vec<_> = m.slides.keys().copied().collect();
            let mut expected = expected;
            dirs.sort();
            expected.sort();
            assert_eq!(expected, dirs, "{notation}");
        }
    }

    #[test]
    fn bounded_and_unbounded_repeats() {
        let m = parse("vR3").unwrap();
        assert_eq!(
            vec![(Direction::F, Range::Limited(3)), (Direction::B, Range::Limited(3))],
            slides(&m)
        );

        // the longer of two slides in one direction wins
        let m = parse("fW2fR").unwrap();
        assert_eq!(vec![(Direction::F, Range::Unlimited)], slides(&m));
    }

    #[test]
    fn leapers() {
        assert_eq!(offsets(&[(2, 0), (-2, 0), (0, 2), (0, -2)]), parse("D").unwrap().jumps);
        assert_eq!(offsets(&[(0, 2)]), parse("fD").unwrap().jumps);
        assert_eq!(offsets(&[(1, 2), (-1, 2)]), parse("ffN").unwrap().jumps);
        assert_eq!(8, parse("N").unwrap().jumps.len());
        assert_eq!(offsets(&[(2, 2), (-2, 2)]), parse("fA").unwrap().jumps);
    }

    #[test]
    fn explicit_offsets() {
        let m = parse("v(1,3)").unwrap();
        assert_eq!(offsets(&[(1, 3), (1, -3), (-1, 3), (-1, -3)]), m.jumps);

        let m = parse("(0,-2)").unwrap();
        assert_eq!(offsets(&[(0, -2), (0, 2), (-2, 0), (2, 0)]), m.jumps);

        assert!(matches!(
            parse("(1,x)"),
            Err(NotationError::InvalidOffset { .. })
        ));
    }

    #[test]
    fn range_capture_clause() {
        assert_eq!(parse("Q").unwrap(), parse("((cQcdQ)-Q)").unwrap());
        assert_eq!(parse("BW3").unwrap(), parse("((cBcdB)-B)W3").unwrap());
    }

    #[test]
    fn triple_slashed_arrows() {
        let m = parse("{F,B}>sW").unwrap();
        assert_eq!(vec![Direction::F, Direction::B], m.triple_slashed_arrow_dirs);
        assert_eq!(Some(Range::Unlimited), m.slide_range(Direction::F));
        assert_eq!(Some(Range::Unlimited), m.slide_range(Direction::B));
        assert_eq!(Some(Range::Limited(1)), m.slide_range(Direction::R));

        let m = parse("{FR,FL}>").unwrap();
        assert_eq!(vec![Direction::FR, Direction::FL], m.triple_slashed_arrow_dirs);
        assert!(m.has_triple_arrow(Direction::FL));
        assert!(!m.has_triple_arrow(Direction::F));

        assert!(matches!(
            parse("{F,XX}>"),
            Err(NotationError::InvalidArrowDirection { .. })
        ));
    }

    #[test]
    fn lion_like_compound() {
        let m = parse("(cK-aK)").unwrap();
        assert!(m.slides.is_empty());
        assert_eq!(1, m.compound_moves.len());

        let c = &m.compound_moves[0];
        assert!(c.can_continue_after_capture);
        assert_eq!(8, c.first.slides.len());
        assert_eq!(8, c.second.slides.len());
    }

    #[test]
    fn same_direction_compound() {
        let m = parse("(cfW-fW)").unwrap();
        assert_eq!(1, m.compound_moves.len());
        let c = &m.compound_moves[0];
        assert_eq!(vec![(Direction::F, Range::Limited(1))], slides(&c.first));
        assert_eq!(vec![(Direction::F, Range::Limited(1))], slides(&c.second));

        let m = parse("(W-fW)").unwrap();
        // only the forward first leg has a matching second leg; the other three merge
        assert_eq!(2, m.compound_moves.len());
        assert!(!m.compound_moves[0].can_continue_after_capture);
    }

    #[test]
    fn perpendicular_compound() {
        let m = parse("(W-sW)").unwrap();
        assert_eq!(2, m.compound_moves.len());
        for c in &m.compound_moves {
            for first in c.first.slides.keys() {
                for second in c.second.slides.keys() {
                    assert!(first.is_perpendicular_to(*second));
                }
            }
        }
    }

    #[test]
    fn leaping_first_leg() {
        let m = parse("(D-W)").unwrap();
        assert_eq!(4, m.compound_moves.len());
        for c in &m.compound_moves {
            assert_eq!(1, c.first.jumps.len());
            let dir = c.first.jumps[0].direction().unwrap();
            assert_eq!(vec![dir], c.second.slides.keys().copied().collect::<Vec<_>>());
        }
    }

    #[test]
    fn order_independence() {
        assert_eq!(parse("fWbW").unwrap(), parse("bWfW").unwrap());
        assert_eq!(parse("frF").unwrap(), parse("rfF").unwrap());
        assert_eq!(parse("(cfrF-afrF)").unwrap(), parse("(crfF-arfF)").unwrap());
    }

    #[test]
    fn errors() {
        let cases = [
            ("fX", 'X'),
            ("W x", ' '),
            ("Wd", 'd'),
            ("3W", '3'),
            ("W-W", '-'),
        ];
        for (notation, bad) in cases {
            match parse(notation) {
                Err(NotationError::InvalidCharacter {
                    character,
                    notation: og,
                }) => {
                    assert_eq!(bad, character, "{notation}");
                    assert_eq!(notation, og);
                }
                other => panic!("{notation} should fail, got {other:?}"),
            }
        }

        assert!(matches!(parse("(W-W"), Err(NotationError::UnbalancedBracket { .. })));
        assert!(matches!(parse("W)"), Err(NotationError::UnbalancedBracket { .. })));
        assert!(matches!(parse("(W-)"), Err(NotationError::EmptyLeg { .. })));
        assert!(matches!(parse("(-W)"), Err(NotationError::EmptyLeg { .. })));

        for notation in ["(-128,1)", "f(1,-128)", "(36,0)", "(0,-36)"] {
            assert!(
                matches!(parse(notation), Err(NotationError::InvalidOffset { .. })),
                "{notation}"
            );
        }
        assert!(parse("(35,-35)").is_ok());

        for notation in ["W0", "FF0", "fR0"] {
            assert!(matches!(parse(notation), Err(NotationError::ZeroRange { .. })), "{notation}");
        }
    }

    #[test]
    fn errors_name_original_notation() {
        let err = parse("{F}>Y").unwrap_err();
        assert_eq!(
            "Error parsing Betza notation {F}>Y: \"Y\" is not a valid character",
            err.to_string()
        );
    }
}
