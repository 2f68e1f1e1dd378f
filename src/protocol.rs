//! Host side of the remote engine protocol (`atsi`, version 0).
//!
//! The protocol is line based: one command per line, arguments separated by
//! spaces. [`GameHost`] performs no I/O. The caller feeds it the lines read
//! from each client and delivers the [`Outgoing`] lines it returns, so any
//! transport (pipes, sockets, channels) can carry a match.
//!
//! A session goes like this:
//!
//! | Direction | Line |
//! |-----------|------|
//! | host → client | `atsiinit v0` |
//! | client → host | `atsiok` |
//! | host → client | `player <0\|1>`, `time <remaining ms> <increment ms>` |
//! | host → both | `startgame <tsfen\|initial>` |
//! | client → host | `move <square> [<step> ...] <square>` |
//! | host → opponent | `opmove <squares> <opponent ms> <mover ms>` |
//! | host → both | `win` / `loss` |
//!
//! Clients may also send `resign`, `quit`, `targets <square>`, `info ...`,
//! `eval ...` and `param ...`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::PieceCatalog;
use crate::core::error::{ProtocolError, TsfenError};
use crate::core::{Direction, Offset, Player, Square, TimeControl};
use crate::game::{Game, GameStatus};
use crate::moves::Move;
use crate::tsfen::INITIAL_ALIAS;
use crate::TRIPLE_ARROW_JUMP_LIMIT;

pub const PROTOCOL_VERSION: &str = "v0";

/// Number of `info` arguments kept per client.
const INFO_FIELDS: usize = 5;

/// A line to deliver to one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub to: Player,
    pub message: String,
}

impl Outgoing {
    fn new(to: Player, message: impl Into<String>) -> Outgoing {
        Outgoing {
            to,
            message: message.into(),
        }
    }
}

/// Referee between two remote clients.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use taikyoku::{GameHost, Outgoing, PieceCatalog, Player, TimeControl};
///
/// let catalog = Arc::new(PieceCatalog::standard().unwrap());
/// let mut host = GameHost::new(catalog, None, TimeControl::default()).unwrap();
///
/// assert_eq!("atsiinit v0", host.connect(Player::Sente)[0].message);
/// let replies = host.handle_message(Player::Sente, "atsiok");
/// assert_eq!(Outgoing { to: Player::Sente, message: "player 0".to_string() }, replies[0]);
/// ```
#[derive(Debug, Clone)]
pub struct GameHost {
    game: Game,
    position: String,
    clock: TimeControl,
    initialised: [bool; 2],
    started: bool,
    last_move: Option<Instant>,
    info: [Vec<String>; 2],
}

impl GameHost {
    /// Creates a host for a match from `position` (a TSFEN string), or from
    /// the starting setup when `None`.
    pub fn new(catalog: Arc<PieceCatalog>, position: Option<String>, clock: TimeControl) -> Result<GameHost, TsfenError> {
        let position = position.unwrap_or_else(|| INITIAL_ALIAS.to_string());
        let game = Game::from_tsfen(catalog, &position)?;

        Ok(GameHost {
            game,
            position,
            clock,
            initialised: [false; 2],
            started: false,
            last_move: None,
            info: [Vec::new(), Vec::new()],
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn clock(&self) -> &TimeControl {
        &self.clock
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn is_initialised(&self, p: Player) -> bool {
        self.initialised[p.index()]
    }

    /// Returns the last `info` fields sent by the client.
    pub fn info(&self, p: Player) -> &[String] {
        &self.info[p.index()]
    }

    /// Greets a newly connected client.
    pub fn connect(&mut self, p: Player) -> Vec<Outgoing> {
        log::info!("{p} connected");
        vec![Outgoing::new(p, format!("atsiinit {PROTOCOL_VERSION}"))]
    }

    /// Starts the match once both clients completed the handshake.
    pub fn start_game(&mut self) -> Result<Vec<Outgoing>, ProtocolError> {
        if !self.initialised.iter().all(|&i| i) {
            return Err(ProtocolError::HandshakeIncomplete);
        }

        self.started = true;
        self.last_move = Some(Instant::now());
        log::info!("game started from {}", self.position);

        let line = format!("startgame {}", self.position);
        Ok(Player::iter().map(|p| Outgoing::new(p, line.clone())).collect())
    }

    /// Handles one line from a client, charging the time elapsed since the
    /// previous move to the mover's clock.
    pub fn handle_message(&mut self, p: Player, message: &str) -> Vec<Outgoing> {
        let elapsed = self.last_move.map(|t| t.elapsed()).unwrap_or_default();
        self.handle_message_timed(p, message, elapsed)
    }

    /// Same as [`GameHost::handle_message`] with the thinking time given
    /// explicitly.
    pub fn handle_message_timed(&mut self, p: Player, message: &str, elapsed: Duration) -> Vec<Outgoing> {
        log::debug!("{p} -> host: {message}");

        if !self.initialised[p.index()] {
            return self.handshake(p, message);
        }

        let mut parts = message.split_whitespace();
        let Some(command) = parts.next() else {
            return Vec::new();
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "move" => match self.try_move(p, &args, elapsed) {
                Ok(out) => out,
                Err(ProtocolError::GameNotStarted) | Err(ProtocolError::GameOver) => {
                    log::warn!("{p} sent a move outside of a game: {message}");
                    Vec::new()
                }
                Err(e) => {
                    log::warn!("{p} made an invalid move ({message}): {e}");
                    self.resign(p)
                }
            },
            "resign" | "quit" => self.resign(p),
            "targets" => match self.targets(&args) {
                Ok(line) => vec![Outgoing::new(p, line)],
                Err(e) => {
                    log::warn!("{p}: {e}");
                    Vec::new()
                }
            },
            "info" => {
                self.info[p.index()] = args.iter().take(INFO_FIELDS).map(|s| s.to_string()).collect();
                Vec::new()
            }
            "eval" => {
                log::info!("eval from {p}: {}", args.join(" "));
                Vec::new()
            }
            "param" => {
                log::warn!("{p}: parameters are not supported: {message}");
                Vec::new()
            }
            other => {
                log::warn!("{p}: {}", ProtocolError::UnknownCommand(other.to_string()));
                Vec::new()
            }
        }
    }

    fn handshake(&mut self, p: Player, message: &str) -> Vec<Outgoing> {
        if message.trim() != "atsiok" {
            log::warn!("{p} is not initialised yet, ignoring {message:?}");
            return Vec::new();
        }

        self.initialised[p.index()] = true;
        vec![
            Outgoing::new(p, format!("player {}", p.index())),
            Outgoing::new(
                p,
                format!(
                    "time {} {}",
                    self.clock.remaining(p).as_millis(),
                    self.clock.increment(p).as_millis()
                ),
            ),
        ]
    }

    /// Ends a running game in favour of `p`'s opponent. Outside of a running
    /// game there is nothing to resign.
    fn resign(&mut self, p: Player) -> Vec<Outgoing> {
        if !self.started || self.game.status() != Ok(GameStatus::Playing) {
            log::warn!("{p} resigned outside of a game");
            return Vec::new();
        }
        self.game.resign(p);
        vec![Outgoing::new(p, "loss"), Outgoing::new(p.flip(), "win")]
    }

    fn targets(&self, args: &[&str]) -> Result<String, ProtocolError> {
        let [arg] = args else {
            return Err(ProtocolError::MalformedMove);
        };
        let sq = parse_square(arg)?;

        let mut line = format!("targets {sq}");
        for mv in self.game.moves_at(sq) {
            line.push(' ');
            line.push_str(&mv.end.to_string());
        }
        Ok(line)
    }

    fn try_move(&mut self, p: Player, args: &[&str], elapsed: Duration) -> Result<Vec<Outgoing>, ProtocolError> {
        if !self.started {
            return Err(ProtocolError::GameNotStarted);
        }
        if self.game.status()? != GameStatus::Playing {
            return Err(ProtocolError::GameOver);
        }

        let requested = parse_move(args)?;
        let mv = self.validate(p, &requested)?;
        self.game.make_move(&mv)?;

        let in_time = self.clock.consume(p, elapsed);
        self.last_move = Some(Instant::now());

        let opponent = p.flip();
        let mut out = vec![Outgoing::new(
            opponent,
            format!(
                "opmove {} {} {}",
                args.join(" "),
                self.clock.remaining(opponent).as_millis(),
                self.clock.remaining(p).as_millis()
            ),
        )];

        if !in_time {
            log::info!("{p} ran out of time");
            out.extend(self.resign(p));
            return Ok(out);
        }

        if let GameStatus::Won(winner) = self.game.status()? {
            log::info!("{winner} won");
            out.push(Outgoing::new(winner, "win"));
            out.push(Outgoing::new(winner.flip(), "loss"));
        }
        Ok(out)
    }

    /// Checks a requested move and returns the cached move it designates.
    fn validate(&self, p: Player, requested: &Move) -> Result<Move, ProtocolError> {
        let (start, end, steps) = (requested.start, requested.end, &requested.intermediate_steps);

        if p != self.game.current_player() {
            return Err(ProtocolError::NotYourTurn(p.index()));
        }

        let piece = self.game.piece_at(start).ok_or(ProtocolError::NoPiece(start))?;
        if piece.owner != p {
            return Err(ProtocolError::NotYourPiece(start));
        }

        let captures = if steps.is_empty() { std::slice::from_ref(&end) } else { steps.as_slice() };
        if !piece.range_capturing {
            if let Some(&own) = captures
                .iter()
                .find(|&&sq| self.game.piece_at(sq).is_some_and(|target| target.owner == p))
            {
                return Err(ProtocolError::SelfCapture(own));
            }
        }

        let mut candidates = self.game.moves_at(start).iter().filter(|m| m.end == end);
        let matched = if steps.is_empty() {
            let candidates: Vec<&Move> = candidates.collect();
            candidates
                .iter()
                .find(|m| m.intermediate_steps.is_empty())
                .or_else(|| candidates.first())
                .map(|m| (*m).clone())
        } else {
            candidates.find(|m| m.intermediate_steps == *steps).cloned()
        };
        let matched = matched.ok_or(ProtocolError::IllegalDestination { start, end })?;

        if matched.is_compound() {
            return Ok(matched);
        }

        let (df, dr) = start.delta(end);
        let (dx, dy) = Offset::from_absolute(p, df, dr);
        if piece.movement.jumps.iter().any(|o| (o.dx as i16, o.dy as i16) == (dx, dy)) {
            return Ok(matched);
        }

        let Some(direction) = Direction::of_line(p, df, dr) else {
            return Ok(matched);
        };
        let arrow = piece.movement.has_triple_arrow(direction);
        if (piece.movement.slide_range(direction).is_none() && !arrow) || piece.range_capturing {
            return Ok(matched);
        }

        let threshold = if arrow {
            TRIPLE_ARROW_JUMP_LIMIT
        } else {
            0
        };
        let distance = df.abs().max(dr.abs());
        let in_the_way = (1..distance)
            .filter_map(|i| start.shift(df.signum() * i, dr.signum() * i))
            .filter(|&sq| self.game.piece_at(sq).is_some())
            .count();
        if in_the_way > threshold {
            return Err(ProtocolError::PathBlocked { start, end });
        }

        Ok(matched)
    }
}

fn parse_square(s: &str) -> Result<Square, ProtocolError> {
    Square::from_algebraic(s).ok_or_else(|| ProtocolError::InvalidSquare(s.to_string()))
}

fn parse_move(args: &[&str]) -> Result<Move, ProtocolError> {
    let squares = args.iter().map(|s| parse_square(s)).collect::<Result<Vec<_>, _>>()?;

    match squares.as_slice() {
        [start, steps @ .., end] if start != end => Ok(Move::with_steps(*start, steps.to_vec(), *end)),
        _ => Err(ProtocolError::MalformedMove),
    }
}
