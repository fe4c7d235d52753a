use pokeher_cli::run;

fn showdown(args: &[&str]) -> (i32, String, String) {
    let mut argv = vec!["pokeher", "showdown"];
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
fn aces_beat_junk() {
    let (code, out, _) = showdown(&[
        "--board", "5s Kc 3d Qc 9c", "--hand", "aces=AhAs", "--hand", "junk=6c5d",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("aces: "));
    assert!(out.contains("one pair"));
    assert!(out.contains("Winner: aces"));
}

#[test]
fn identical_strength_splits_with_odd_chip_to_first() {
    let (code, out, _) = showdown(&[
        "--board", "2c 3d 7h 9s Kd", "--hand", "a=AhQc", "--hand", "b=AdQs", "--pot", "41",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("Winner: a, b (split)"));
    assert!(out.contains("a takes 21"));
    assert!(out.contains("b takes 20"));
}

#[test]
fn comma_separated_board_is_accepted() {
    let (code, out, _) = showdown(&[
        "--board", "Th,Jh,Qh", "--hand", "royal=AhKh", "--hand", "pair=TcTd",
    ]);
    assert_eq!(code, 0);
    assert!(out.contains("straight flush"));
    assert!(out.contains("Winner: royal"));
}

#[test]
fn card_shared_between_hand_and_board_is_rejected() {
    let (code, _, err) = showdown(&[
        "--board", "5s Kc 3d Qc 9c", "--hand", "a=QcJd", "--hand", "b=AhAs",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("Duplicate card"));
}

#[test]
fn same_name_twice_is_rejected() {
    let (code, _, err) = showdown(&[
        "--board", "5s Kc 3d", "--hand", "a=AhAs", "--hand", "a=2c2d",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("listed twice"));
}

#[test]
fn short_board_is_rejected() {
    let (code, _, err) = showdown(&["--board", "5s Kc", "--hand", "a=AhAs", "--hand", "b=2c2d"]);
    assert_eq!(code, 2);
    assert!(err.contains("board needs 3 to 5 cards"));
}

#[test]
fn single_hand_is_rejected() {
    let (code, _, err) = showdown(&["--board", "5s Kc 3d", "--hand", "a=AhAs"]);
    assert_eq!(code, 2);
    assert!(err.contains("at least 2 hands"));
}
