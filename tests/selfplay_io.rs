use pieothello::search::Level;
use pieothello::selfplay::{generate_games, read_jsonl, write_jsonl, SelfPlayParams};

#[test]
fn write_and_read_jsonl() {
    let params = SelfPlayParams {
        games: 2,
        black_level: Level::new(2),
        white_level: Level::new(1),
        seed: 123,
        max_plies: 12,
    };
    let games = generate_games(&params);
    let path = std::path::Path::new("target/selfplay_test/games.jsonl");
    write_jsonl(&games, path).unwrap();
    let back = read_jsonl(path).unwrap();
    assert_eq!(back, games);
    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(text.lines().count(), 2);
}
