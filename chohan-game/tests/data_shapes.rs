use chohan_game::{Call, DicePair, ScriptedDice, Session, resolve_round};
use serde_json::Value;

#[test]
fn round_outcome_serializes_every_announced_fact() {
    let (_, outcome) = resolve_round(1_000.0, 1_000, Call::Cho, DicePair::new(2, 4).unwrap());
    let value = serde_json::to_value(outcome).unwrap();
    let object = value.as_object().unwrap();
    for key in [
        "wager",
        "call",
        "dice",
        "total",
        "parity",
        "winning_call",
        "won",
        "bonus",
        "bonus_amount",
        "fee",
        "purse_before",
        "purse_after",
    ] {
        assert!(object.contains_key(key), "missing {key}");
    }
    assert_eq!(value["call"], Value::from("Cho"));
    assert_eq!(value["parity"], Value::from("Even"));
    assert_eq!(value["dice"]["first"], Value::from(2));
    assert_eq!(value["fee"], Value::from(120.0));
}

#[test]
fn losing_outcome_has_null_fee() {
    let (_, outcome) = resolve_round(500.0, 50, Call::Han, DicePair::new(3, 3).unwrap());
    let value = serde_json::to_value(outcome).unwrap();
    assert!(value["fee"].is_null());
    assert_eq!(value["won"], Value::from(false));
}

#[test]
fn session_stats_roundtrip_through_json() {
    let mut session = Session::new(ScriptedDice::from_pairs(&[(1, 1), (2, 3)]));
    session.bet(100).unwrap();
    session.call(Call::Cho).unwrap();
    session.bet(100).unwrap();
    session.call(Call::Cho).unwrap();

    let json = serde_json::to_string(session.stats()).unwrap();
    let parsed: chohan_game::SessionStats = serde_json::from_str(&json).unwrap();
    assert_eq!(&parsed, session.stats());
    assert_eq!(parsed.bonuses, 1);
}
