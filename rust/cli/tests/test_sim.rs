use pokeher_cli::run;
use serde_json::Value;
use serial_test::serial;

const ENV_KEYS: &[&str] = &[
    "POKEHER_CONFIG",
    "POKEHER_SEED",
    "POKEHER_STACK",
    "POKEHER_SMALL_BLIND",
    "POKEHER_BIG_BLIND",
    "POKEHER_HANDS_PER_LEVEL",
    "POKEHER_LIMIT",
    "POKEHER_ON_ILLEGAL",
];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn sim(args: &[&str]) -> (i32, String, String) {
    let mut argv = vec!["pokeher", "sim"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
#[serial]
fn json_lines_one_per_hand_and_zero_sum() {
    clear_env();
    let (code, out, _) = sim(&[
        "--hands", "5", "--bots", "station,station", "--seed", "7", "--json",
    ]);
    assert_eq!(code, 0);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    for line in lines {
        let rec: Value = serde_json::from_str(line).unwrap();
        let deltas = rec["deltas"].as_object().unwrap();
        let sum: i64 = deltas.values().map(|v| v.as_i64().unwrap()).sum();
        assert_eq!(sum, 0);
        assert!(rec["ts"].is_string());
        assert!(rec["hand_id"].as_str().unwrap().contains("-0000"));
    }
}

#[test]
#[serial]
fn button_moves_each_hand() {
    clear_env();
    let (code, out, _) = sim(&[
        "--hands", "2", "--bots", "station,station,station", "--seed", "3", "--json",
    ]);
    assert_eq!(code, 0);
    let buttons: Vec<String> = out
        .lines()
        .map(|l| {
            let rec: Value = serde_json::from_str(l).unwrap();
            rec["button"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(buttons, vec!["bot_0", "bot_1"]);
}

#[test]
#[serial]
fn same_seed_same_results() {
    clear_env();
    let args = ["--hands", "20", "--bots", "baseline,random,random", "--seed", "11"];
    let (code_a, out_a, _) = sim(&args);
    let (code_b, out_b, _) = sim(&args);
    assert_eq!(code_a, 0);
    assert_eq!(code_b, 0);
    assert_eq!(out_a, out_b);
}

#[test]
#[serial]
fn text_summary_conserves_chips() {
    clear_env();
    let (code, out, _) = sim(&[
        "--hands", "30", "--bots", "baseline,random", "--seed", "5", "--stack", "500",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("Simulated: "));
    assert!(out.contains("bot_0 (BaselineAI)"));
    assert!(out.contains("bot_1 (RandomBot)"));
    let total: u32 = out
        .lines()
        .filter(|l| l.trim_start().starts_with("bot_"))
        .map(|l| l.rsplit(' ').next().unwrap().parse::<u32>().unwrap())
        .sum();
    assert_eq!(total, 1000);
}

#[test]
#[serial]
fn pot_limit_from_env_plays_legally() {
    clear_env();
    unsafe {
        std::env::set_var("POKEHER_LIMIT", "pot-limit");
        std::env::set_var("POKEHER_ON_ILLEGAL", "reject");
    }
    let (code, _, err) = sim(&["--hands", "20", "--bots", "baseline,random,random", "--seed", "9"]);
    clear_env();
    assert_eq!(code, 0, "stderr: {}", err);
}

#[test]
#[serial]
fn zero_hands_is_invalid() {
    clear_env();
    let (code, _, err) = sim(&["--hands", "0"]);
    assert_eq!(code, 2);
    assert!(err.contains("hands must be >= 1"));
}

#[test]
#[serial]
fn one_bot_is_invalid() {
    clear_env();
    let (code, _, err) = sim(&["--bots", "baseline"]);
    assert_eq!(code, 2);
    assert!(err.contains("at least 2 bots"));
}

#[test]
#[serial]
fn unknown_bot_is_invalid() {
    clear_env();
    let (code, _, err) = sim(&["--bots", "baseline,shark"]);
    assert_eq!(code, 2);
    assert!(err.contains("shark"));
}

#[test]
#[serial]
fn stacks_too_large_for_a_pot_are_refused() {
    clear_env();
    let (code, _, err) = sim(&[
        "--hands", "1", "--bots", "station,station", "--seed", "1", "--stack", "3000000000",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("more than a pot can count"));
}
