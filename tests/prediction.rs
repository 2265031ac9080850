use table_whatif::elo::{predict_match, team_rating};
use table_whatif::sample_data::{sample_round, sample_standings};
use table_whatif::standings::StandingsEntry;

fn rating_of(table: &[StandingsEntry], team_id: u32) -> i32 {
    let pos = table
        .iter()
        .position(|e| e.team.id == team_id)
        .expect("team should be in the sample table");
    team_rating(&table[pos], pos as u32 + 1)
}

#[test]
fn ratings_track_the_table() {
    let table = sample_standings();
    let ratings: Vec<i32> = table
        .iter()
        .enumerate()
        .map(|(i, e)| team_rating(e, i as u32 + 1))
        .collect();

    assert_eq!(ratings[0], 2168);
    assert_eq!(ratings[1], 2092);
    assert_eq!(ratings[19], 1170);

    // The sample table has no upsets: strength falls with every place.
    for pair in ratings.windows(2) {
        assert!(pair[0] > pair[1], "{} should beat {}", pair[0], pair[1]);
    }
}

#[test]
fn title_clash_favors_the_hosts() {
    let table = sample_standings();
    let p = predict_match(rating_of(&table, 42), rating_of(&table, 40));

    assert_eq!(p.home_win_pct, 75);
    assert_eq!(p.draw_pct, 20);
    assert_eq!(p.away_win_pct, 5);
    assert_eq!(p.predicted_score, "2-0");
    assert_eq!(p.confidence, 75);
}

#[test]
fn city_rout_bournemouth() {
    let table = sample_standings();
    // Gap of 284 clears the 3-0 line.
    let p = predict_match(rating_of(&table, 50), rating_of(&table, 35));

    assert_eq!(p.home_win_pct, 75);
    assert_eq!(p.predicted_score, "3-0");
}

#[test]
fn chelsea_are_favorites_away_at_united() {
    let table = sample_standings();
    let p = predict_match(rating_of(&table, 33), rating_of(&table, 49));

    assert_eq!(p.home_win_pct, 8);
    assert_eq!(p.draw_pct, 22);
    assert_eq!(p.away_win_pct, 70);
    assert_eq!(p.predicted_score, "0-3");
    assert_eq!(p.confidence, 70);
}

#[test]
fn spurs_shade_villa_at_home() {
    let table = sample_standings();
    let p = predict_match(rating_of(&table, 47), rating_of(&table, 66));

    assert_eq!(p.home_win_pct, 72);
    assert_eq!(p.draw_pct, 20);
    assert_eq!(p.away_win_pct, 8);
    assert_eq!(p.predicted_score, "2-0");
}

#[test]
fn basement_battle_still_leans_home() {
    let table = sample_standings();
    let p = predict_match(rating_of(&table, 41), rating_of(&table, 57));

    assert_eq!(p.home_win_pct, 61);
    assert_eq!(p.draw_pct, 28);
    assert_eq!(p.away_win_pct, 11);
    assert_eq!(p.predicted_score, "2-0");
}

#[test]
fn whole_round_predicts_cleanly() {
    let table = sample_standings();
    for fixture in sample_round() {
        let p = predict_match(
            rating_of(&table, fixture.home.id),
            rating_of(&table, fixture.away.id),
        );
        let sum = p.home_win_pct + p.draw_pct + p.away_win_pct;
        assert!(
            (99..=101).contains(&sum),
            "sum {sum} for fixture {}",
            fixture.id
        );
        assert_eq!(
            p.confidence,
            p.home_win_pct.max(p.draw_pct).max(p.away_win_pct)
        );
        assert!(!p.predicted_score.is_empty());
    }
}
