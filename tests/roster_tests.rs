use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use quidditch::roster::{load_teams, save_teams, Role, Team, TEAM_SIZE};
use quidditch::sim::{simulate_match, MatchConfig, Rng};

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("quidditch-{name}-{stamp}.json"))
}

#[test]
fn random_teams_always_validate() {
    let mut rng = Rng::new(77);
    for i in 0..20 {
        let team = Team::random(&format!("Team {i}"), &mut rng);
        team.validate().expect("random team should be valid");
        assert_eq!(team.players.len(), TEAM_SIZE);
        assert_eq!(team.role_count(Role::Chaser), 3);
        assert_eq!(team.role_count(Role::Beater), 2);
        assert_eq!(team.role_count(Role::Keeper), 1);
        assert_eq!(team.role_count(Role::Seeker), 1);
    }
}

#[test]
fn persisted_teams_feed_the_engine_identically() {
    let mut rng = Rng::new(88);
    let home = Team::random("Falcons", &mut rng);
    let away = Team::random("Harpies", &mut rng);

    let path = unique_temp_path("roundtrip");
    save_teams(&path, &[home.clone(), away.clone()]).expect("save should succeed");
    let loaded = load_teams(&path).expect("load should succeed");
    let _ = fs::remove_file(&path);

    assert_eq!(loaded.len(), 2);
    let config = MatchConfig {
        time_limit: Some(150),
    };
    let direct = simulate_match(&home, &away, config, &mut Rng::new(5))
        .expect("original teams should simulate");
    let reloaded = simulate_match(&loaded[0], &loaded[1], config, &mut Rng::new(5))
        .expect("reloaded teams should simulate");
    assert_eq!(direct, reloaded);
}

#[test]
fn hand_edited_file_with_bad_roster_is_loadable_but_invalid() {
    let mut rng = Rng::new(89);
    let mut team = Team::random("Falcons", &mut rng);
    team.players.pop();

    let path = unique_temp_path("invalid");
    save_teams(&path, &[team]).expect("save should succeed");
    let loaded = load_teams(&path).expect("load should still parse");
    let _ = fs::remove_file(&path);

    assert!(loaded[0].validate().is_err());
}
