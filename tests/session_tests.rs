use tetroship::{BoardLimits, GameSession, Phase, PlayerId};

use PlayerId::{P1, P2};

/// `I` line for five disjoint in-bounds ships on a 10x10 board:
/// bar (0,0)-(0,3), square (2,0)-(3,1), tee (5,1)+(6,0)-(6,2),
/// jay (7,4),(8,4),(9,4),(9,5), ell (0,9),(1,9),(2,9),(2,8).
const FLEET_LINE: &str = "I 1 0 0 0 2 0 0 2 3 0 0 5 4 0 4 7 5 0 9 0";

/// Cells of the fleet above, ship by ship in placement order.
fn fleet_cells() -> Vec<(u16, u16)> {
    vec![
        (0, 0), (0, 1), (0, 2), (0, 3),
        (2, 0), (2, 1), (3, 0), (3, 1),
        (5, 1), (6, 0), (6, 1), (6, 2),
        (7, 4), (8, 4), (9, 4), (9, 5),
        (0, 9), (1, 9), (2, 9), (2, 8),
    ]
}

/// Cells guaranteed empty under the fleet above.
fn safe_cells() -> Vec<(u16, u16)> {
    let mut cells: Vec<(u16, u16)> = (0..10).map(|c| (4, c)).collect();
    cells.push((5, 0));
    cells.extend((2..10).map(|c| (5, c)));
    cells
}

fn replies(session: &mut GameSession, from: PlayerId, line: &str) -> Vec<(PlayerId, String)> {
    session.handle_line(from, line)
}

fn reply(session: &mut GameSession, from: PlayerId, line: &str) -> (PlayerId, String) {
    let mut out = session.handle_line(from, line);
    assert_eq!(out.len(), 1, "expected a single reply to {:?}", line);
    out.pop().unwrap()
}

fn expect(session: &mut GameSession, from: PlayerId, line: &str, wire: &str) {
    assert_eq!(
        reply(session, from, line),
        (from, wire.to_string()),
        "command {:?}",
        line
    );
}

fn setup_boards(session: &mut GameSession) {
    expect(session, P1, "B 10 10", "A");
    expect(session, P2, "B", "A");
}

fn battle_session() -> GameSession {
    let mut session = GameSession::new();
    setup_boards(&mut session);
    expect(&mut session, P1, FLEET_LINE, "A");
    expect(&mut session, P2, FLEET_LINE, "A");
    assert_eq!(session.phase(), Phase::Battle);
    assert_eq!(session.turn(), P1);
    session
}

#[test]
fn both_begins_advance_to_placement() {
    let mut session = GameSession::new();
    assert_eq!(session.phase(), Phase::Setup);
    expect(&mut session, P1, "B 10 10", "A");
    assert_eq!(session.phase(), Phase::Setup);
    expect(&mut session, P2, "B", "A");
    assert_eq!(session.phase(), Phase::Placement);
    assert_eq!(session.dims().unwrap().width, 10);
}

#[test]
fn peer_order_does_not_matter_during_setup() {
    let mut session = GameSession::new();
    expect(&mut session, P2, "B", "A");
    expect(&mut session, P1, "B 14 12", "A");
    assert_eq!(session.phase(), Phase::Placement);
    let dims = session.dims().unwrap();
    assert_eq!((dims.width, dims.height), (14, 12));
}

#[test]
fn dimension_authority_is_enforced() {
    let mut session = GameSession::new();
    // player 1 must carry dimensions, player 2 must not
    expect(&mut session, P1, "B", "E 200");
    expect(&mut session, P2, "B 10 10", "E 200");
    // rejected commands left both players unready
    expect(&mut session, P1, "B 10 10", "A");
    expect(&mut session, P2, "B", "A");
}

#[test]
fn dimensions_outside_the_limits_are_rejected() {
    for line in ["B 9 10", "B 10 9", "B 21 10", "B 10 21", "B -3 10", "B 100000 10"] {
        let mut session = GameSession::new();
        expect(&mut session, P1, line, "E 200");
        assert_eq!(session.phase(), Phase::Setup);
    }
}

#[test]
fn custom_limits_move_the_accepted_range() {
    let mut session = GameSession::with_limits(BoardLimits::new(10, 15));
    expect(&mut session, P1, "B 16 16", "E 200");
    expect(&mut session, P1, "B 15 15", "A");
}

#[test]
fn second_begin_from_the_same_player_is_a_phase_violation() {
    let mut session = GameSession::new();
    expect(&mut session, P1, "B 10 10", "A");
    expect(&mut session, P1, "B 12 12", "E 100");
    // the accepted dimensions stand
    assert_eq!(session.dims().unwrap().width, 10);
}

#[test]
fn commands_out_of_phase_are_rejected_with_the_phase_code() {
    let mut session = GameSession::new();
    expect(&mut session, P1, FLEET_LINE, "E 100");
    expect(&mut session, P1, "S 0 0", "E 100");
    expect(&mut session, P1, "Q", "E 100");
    expect(&mut session, P1, "X", "E 100");

    setup_boards(&mut session);
    expect(&mut session, P1, "B 10 10", "E 101");
    expect(&mut session, P1, "S 0 0", "E 101");

    expect(&mut session, P1, FLEET_LINE, "A");
    expect(&mut session, P2, FLEET_LINE, "A");
    expect(&mut session, P1, "B 10 10", "E 102");
    expect(&mut session, P1, FLEET_LINE, "E 102");
}

#[test]
fn malformed_lines_take_the_parameter_code_of_their_phase() {
    let mut session = GameSession::new();
    expect(&mut session, P1, "B ten 10", "E 200");
    setup_boards(&mut session);
    expect(&mut session, P1, "I 1 0 0", "E 201");
    expect(&mut session, P1, FLEET_LINE, "A");
    expect(&mut session, P2, FLEET_LINE, "A");
    expect(&mut session, P1, "S 1", "E 202");
    expect(&mut session, P1, "Q extra", "E 202");
    // a command that is malformed AND out of phase reports the phase
    expect(&mut session, P1, "I 1 0 0", "E 102");
}

#[test]
fn placement_rule_errors_surface_their_own_codes() {
    let mut session = GameSession::new();
    setup_boards(&mut session);
    expect(&mut session, P1, "I 8 0 0 0 2 0 0 2 3 0 0 5 4 0 4 7 5 0 9 0", "E 300");
    expect(&mut session, P1, "I 1 4 0 0 2 0 0 2 3 0 0 5 4 0 4 7 5 0 9 0", "E 301");
    expect(&mut session, P1, "I 1 0 7 0 2 0 0 2 3 0 0 5 4 0 4 7 5 0 9 0", "E 302");
    expect(&mut session, P1, "I 1 0 0 0 1 0 2 0 3 0 0 5 4 0 4 7 5 0 9 0", "E 303");
    // a huge anchor is just another out-of-bounds placement
    expect(&mut session, P1, "I 3 0 2147483647 0 2 0 0 2 3 0 0 5 4 0 4 7 5 0 9 0", "E 302");
    // nothing was committed along the way
    assert!(!session.player(P1).is_playing());
    expect(&mut session, P1, FLEET_LINE, "A");
    assert!(session.player(P1).is_playing());
    assert_eq!(session.player(P1).ships_remaining(), Some(5));
}

#[test]
fn second_fleet_from_the_same_player_is_rejected() {
    let mut session = GameSession::new();
    setup_boards(&mut session);
    expect(&mut session, P1, FLEET_LINE, "A");
    expect(&mut session, P1, FLEET_LINE, "E 101");
    assert_eq!(session.phase(), Phase::Placement);
}

#[test]
fn a_miss_reports_remaining_ships_and_flips_the_turn() {
    let mut session = battle_session();
    expect(&mut session, P1, "S 4 4", "R 5 M");
    assert_eq!(session.turn(), P2);
    expect(&mut session, P2, "S 4 4", "R 5 M");
    assert_eq!(session.turn(), P1);
}

#[test]
fn shooting_out_of_turn_is_rejected_without_side_effects() {
    let mut session = battle_session();
    expect(&mut session, P2, "S 0 0", "E 402");
    assert_eq!(session.turn(), P1);
    // the rejected shot never reached the log: the same cell still works
    expect(&mut session, P1, "S 4 0", "R 5 M");
    expect(&mut session, P2, "S 0 0", "R 5 H");
}

#[test]
fn shots_off_the_board_are_rejected_and_keep_the_turn() {
    let mut session = battle_session();
    for line in ["S 10 0", "S 0 10", "S -1 0", "S 0 -1"] {
        expect(&mut session, P1, line, "E 400");
        assert_eq!(session.turn(), P1);
    }
}

#[test]
fn repeating_a_cell_is_rejected_and_changes_nothing() {
    let mut session = battle_session();
    expect(&mut session, P1, "S 0 0", "R 5 H");
    expect(&mut session, P2, "S 4 4", "R 5 M");
    expect(&mut session, P1, "S 0 0", "E 401");
    assert_eq!(session.turn(), P1);
    assert_eq!(session.player(P2).ships_remaining(), Some(5));
    expect(&mut session, P1, "S 0 1", "R 5 H");
}

#[test]
fn fourth_hit_sinks_the_ship_and_decrements_remaining() {
    let mut session = battle_session();
    let safe = safe_cells();
    // the first three bar cells hit without sinking
    for (i, col) in (0..3).enumerate() {
        expect(&mut session, P1, &format!("S 0 {}", col), "R 5 H");
        let (r, c) = safe[i];
        expect(&mut session, P2, &format!("S {} {}", r, c), "R 5 M");
    }
    expect(&mut session, P1, "S 0 3", "R 4 H");
    assert_eq!(session.player(P2).ships_remaining(), Some(4));
}

#[test]
fn query_reports_own_shots_in_firing_order() {
    let mut session = battle_session();
    expect(&mut session, P1, "S 0 0", "R 5 H");
    expect(&mut session, P2, "S 4 0", "R 5 M");
    expect(&mut session, P1, "S 9 9", "R 5 M");
    // not player 1's turn, but queries are always allowed
    assert_eq!(session.turn(), P2);
    expect(&mut session, P1, "Q", "G 5 H 0 0 M 9 9");
    expect(&mut session, P2, "Q", "G 5 M 4 0");
    // queries never move the turn
    assert_eq!(session.turn(), P2);
}

#[test]
fn query_before_any_shot_lists_nothing() {
    let mut session = battle_session();
    expect(&mut session, P1, "Q", "G 5");
}

#[test]
fn forfeit_ends_the_game_for_both_peers() {
    let mut session = battle_session();
    let out = replies(&mut session, P2, "F");
    assert_eq!(
        out,
        vec![(P2, "H 0".to_string()), (P1, "H 1".to_string())]
    );
    assert!(session.is_terminal());
    assert!(replies(&mut session, P1, "S 0 0").is_empty());
    assert!(replies(&mut session, P1, "Q").is_empty());
}

#[test]
fn forfeit_is_accepted_even_during_setup() {
    let mut session = GameSession::new();
    let out = replies(&mut session, P1, "F");
    assert_eq!(
        out,
        vec![(P1, "H 0".to_string()), (P2, "H 1".to_string())]
    );
    assert!(session.is_terminal());
}

#[test]
fn destroying_the_last_ship_wins_the_game() {
    let mut session = battle_session();
    let targets = fleet_cells();
    let safe = safe_cells();
    for (i, &(r, c)) in targets.iter().enumerate() {
        let line = format!("S {} {}", r, c);
        if i + 1 == targets.len() {
            let out = replies(&mut session, P1, &line);
            assert_eq!(
                out,
                vec![
                    (P1, "R 0 H".to_string()),
                    (P2, "H 0".to_string()),
                    (P1, "H 1".to_string()),
                ]
            );
        } else {
            // a ship sinks on every fourth consecutive hit
            let remaining = 5 - (i + 1) / 4;
            expect(&mut session, P1, &line, &format!("R {} H", remaining));
            let (sr, sc) = safe[i];
            expect(&mut session, P2, &format!("S {} {}", sr, sc), "R 5 M");
        }
    }
    assert!(session.is_terminal());
    assert_eq!(session.player(P2).ships_remaining(), Some(0));
    assert!(replies(&mut session, P2, "S 0 0").is_empty());
}
