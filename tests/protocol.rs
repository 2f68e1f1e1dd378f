use std::sync::Arc;
use std::time::Duration;

use taikyoku::{Game, GameHost, GameStatus, Outgoing, Piece, PieceCatalog, Player, Species, Square, TimeControl};

fn catalog() -> Arc<PieceCatalog> {
    Arc::new(PieceCatalog::standard().unwrap())
}

fn sq(file: u8, rank: u8) -> Square {
    Square::new(file, rank).unwrap()
}

fn lines(out: &[Outgoing], to: Player) -> Vec<String> {
    out.iter().filter(|o| o.to == to).map(|o| o.message.clone()).collect()
}

/// Connects both clients and starts the match.
fn start(position: Option<String>, clock: TimeControl) -> GameHost {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut host = GameHost::new(catalog(), position.clone(), clock).unwrap();
    for p in Player::iter() {
        assert_eq!(vec!["atsiinit v0".to_string()], lines(&host.connect(p), p));
        let out = host.handle_message(p, "atsiok");
        assert_eq!(format!("player {}", p.index()), lines(&out, p)[0]);
        assert!(host.is_initialised(p));
    }

    let out = host.start_game().unwrap();
    let expected = format!("startgame {}", position.as_deref().unwrap_or("initial"));
    for p in Player::iter() {
        assert_eq!(vec![expected.clone()], lines(&out, p));
    }
    assert!(host.has_started());
    host
}

/// A position where Sente's rook can take Gote's only king.
fn king_hunt() -> String {
    let catalog = catalog();
    let mut game = Game::new(catalog.clone());
    let mut put = |code: &str, owner, at| {
        let piece = Piece::new(&catalog, Species::new(code).unwrap(), owner).unwrap();
        game.set_square(at, Some(piece));
    };
    put("K", Player::Sente, sq(30, 35));
    put("K", Player::Gote, sq(5, 3));
    put("R", Player::Sente, sq(5, 20));
    put("LN", Player::Sente, sq(20, 20));
    put("P", Player::Gote, sq(20, 19));
    game.to_tsfen()
}

/// Kings far apart, plus `pieces` as `(code, owner, file, rank)`.
fn position(pieces: &[(&str, Player, u8, u8)]) -> String {
    let catalog = catalog();
    let mut game = Game::new(catalog.clone());
    let kings = [("K", Player::Sente, 30, 35), ("K", Player::Gote, 5, 3)];
    for &(code, owner, file, rank) in kings.iter().chain(pieces) {
        let piece = Piece::new(&catalog, Species::new(code).unwrap(), owner).unwrap();
        game.set_square(sq(file, rank), Some(piece));
    }
    game.to_tsfen()
}

#[test]
fn moves_are_relayed_with_clock_values() {
    let clock = TimeControl::fischer(Duration::from_secs(30), Duration::from_secs(1));
    let mut host = start(None, clock);

    let out = host.handle_message_timed(Player::Sente, "move 34gg 34ff", Duration::from_millis(2500));
    assert_eq!(vec!["opmove 34gg 34ff 30000 28500".to_string()], lines(&out, Player::Gote));

    let out = host.handle_message_timed(Player::Gote, "move 34d 34e", Duration::from_millis(500));
    assert_eq!(vec!["opmove 34d 34e 28500 30500".to_string()], lines(&out, Player::Sente));

    assert_eq!(2, host.game().move_counter());
    assert_eq!(Duration::from_millis(30500), host.clock().gote_time());
    assert_eq!(Ok(GameStatus::Playing), host.game().status());
}

#[test]
fn capturing_the_last_king_ends_the_game() {
    let mut host = start(Some(king_hunt()), TimeControl::default());

    let out = host.handle_message_timed(Player::Sente, "move 31u 31d", Duration::from_secs(1));
    let gote = lines(&out, Player::Gote);
    assert_eq!(2, gote.len());
    assert!(gote[0].starts_with("opmove 31u 31d "));
    assert_eq!("loss", gote[1]);
    assert_eq!(vec!["win".to_string()], lines(&out, Player::Sente));
    assert_eq!(Ok(GameStatus::Won(Player::Sente)), host.game().status());

    // the game is over, further moves are ignored
    assert!(host.handle_message(Player::Gote, "move 31d 31e").is_empty());
}

#[test]
fn compound_moves_carry_their_steps() {
    let mut host = start(Some(king_hunt()), TimeControl::default());

    // a move must leave its starting square
    let out = host.handle_message_timed(Player::Sente, "move 16u 16t 16u", Duration::from_secs(1));
    assert_eq!(vec!["win".to_string()], lines(&out, Player::Gote));
    assert_eq!(vec!["loss".to_string()], lines(&out, Player::Sente));

    let mut host = start(Some(king_hunt()), TimeControl::default());
    let out = host.handle_message_timed(Player::Sente, "move 16u 16t 16s", Duration::from_secs(1));
    let gote = lines(&out, Player::Gote);
    assert_eq!(1, gote.len());
    assert!(gote[0].starts_with("opmove 16u 16t 16s "));

    let game = host.game();
    assert_eq!(None, game.piece_at(sq(20, 19)));
    assert_eq!(None, game.piece_at(sq(20, 20)));
    assert_eq!("LN", game.piece_at(sq(20, 18)).unwrap().species.as_str());
}

#[test]
fn blocked_and_out_of_turn_moves_resign() {
    // the rook cannot pass its own lion
    let mut host = start(Some(king_hunt()), TimeControl::default());
    let out = host.handle_message(Player::Sente, "move 31u 1u");
    assert_eq!(vec!["loss".to_string()], lines(&out, Player::Sente));
    assert_eq!(vec!["win".to_string()], lines(&out, Player::Gote));

    let mut host = start(None, TimeControl::default());
    let out = host.handle_message(Player::Gote, "move 34d 34e");
    assert_eq!(vec!["loss".to_string()], lines(&out, Player::Gote));
    assert_eq!(Ok(GameStatus::Won(Player::Sente)), host.game().status());
}

#[test]
fn running_out_of_time_loses() {
    let clock = TimeControl::Byoyomi {
        sente_time: Duration::from_secs(5),
        gote_time: Duration::from_secs(5),
        byoyomi: Duration::from_secs(1),
    };
    let mut host = start(None, clock);

    let out = host.handle_message_timed(Player::Sente, "move 34gg 34ff", Duration::from_secs(7));
    let gote = lines(&out, Player::Gote);
    assert!(gote[0].starts_with("opmove 34gg 34ff "));
    assert_eq!("win", gote[1]);
    assert_eq!(vec!["loss".to_string()], lines(&out, Player::Sente));
    assert_eq!(Ok(GameStatus::Won(Player::Gote)), host.game().status());
}

#[test]
fn triple_arrows_pass_up_to_three_pieces() {
    let diagonal = [(9, 19), (8, 18), (7, 17)];
    let mut pieces = vec![("GDR", Player::Sente, 10, 20)];
    for (i, &(file, rank)) in diagonal.iter().enumerate() {
        let owner = if i == 1 { Player::Sente } else { Player::Gote };
        pieces.push(("P", owner, file, rank));
        pieces.push(("P", owner, 20 - file, rank));
    }
    let mut host = start(Some(position(&pieces)), TimeControl::default());

    let out = host.handle_message_timed(Player::Sente, "move 26u 30q", Duration::from_secs(1));
    let gote = lines(&out, Player::Gote);
    assert_eq!(1, gote.len());
    assert!(gote[0].starts_with("opmove 26u 30q "));
    assert!(lines(&out, Player::Sente).is_empty());

    let game = host.game();
    assert_eq!("GDR", game.piece_at(sq(6, 16)).unwrap().species.as_str());
    for (file, rank) in diagonal {
        assert!(game.piece_at(sq(file, rank)).is_some());
    }
    assert_eq!(Ok(GameStatus::Playing), game.status());
}

#[test]
fn leaps_along_a_slide_line_ignore_blockers() {
    // the turtle slides forward but also leaps three squares ahead
    let pieces = [
        ("GT", Player::Sente, 20, 25),
        ("P", Player::Sente, 20, 24),
        ("P", Player::Gote, 20, 23),
    ];
    let mut host = start(Some(position(&pieces)), TimeControl::default());

    let out = host.handle_message_timed(Player::Sente, "move 16z 16w", Duration::from_secs(1));
    let gote = lines(&out, Player::Gote);
    assert_eq!(1, gote.len());
    assert!(gote[0].starts_with("opmove 16z 16w "));

    let game = host.game();
    assert_eq!("GT", game.piece_at(sq(20, 22)).unwrap().species.as_str());
    assert_eq!("P", game.piece_at(sq(20, 23)).unwrap().species.as_str());
    assert_eq!(Player::Gote, game.current_player());

    // a plain slide through the same pawns is refused
    let mut host = start(Some(position(&pieces)), TimeControl::default());
    let out = host.handle_message_timed(Player::Sente, "move 16z 16v", Duration::from_secs(1));
    assert_eq!(vec!["loss".to_string()], lines(&out, Player::Sente));
}
