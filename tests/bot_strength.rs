use dama::arena::{run_match, MatchConfig};
use dama::bot::SmartLevel;

#[test]
fn test_smart_bot_beats_random_bot() {
    let config = MatchConfig::new(4, 50).seed(2024).level(SmartLevel::Hard);
    let stats = run_match(&config).unwrap();

    assert_eq!(stats.games, 50);
    assert!(
        (stats.win_rate() + stats.draw_rate() - 1.0).abs() < 1e-9,
        "random bot won {} games",
        stats.random_wins
    );
    assert!(stats.win_rate() > 0.5, "win rate {}", stats.win_rate());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let config = MatchConfig::new(2, 6).seed(7).level(SmartLevel::Medium);
    let a = run_match(&config).unwrap();
    let b = run_match(&config).unwrap();
    assert_eq!(
        (a.smart_wins, a.random_wins, a.draws, a.plies),
        (b.smart_wins, b.random_wins, b.draws, b.plies)
    );
}
