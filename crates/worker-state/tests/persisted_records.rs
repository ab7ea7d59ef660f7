//! Reading worker memory records as a scheduler stores them

use worker_state::{Direction, Goal, ObjectId, Position, TargetKind, WorkerMemory};

const STORED: &str = r#"{
    "goal": "Reinforce",
    "working": true,
    "target_reinforce": "rampart_0012",
    "target_harvest": "source_0003",
    "pathTarget": { "x": 20, "y": 14, "roomName": "W1N1" },
    "path": [
        { "x": 11, "y": 11, "dx": 1, "dy": 1, "direction": 4 },
        { "x": 12, "y": 12, "dx": 1, "dy": 1, "direction": 4 }
    ],
    "pathStep": 1,
    "room": "W1N1",
    "lifetimeCounterDecremented": false,
    "role": "Worker"
}"#;

#[test]
fn test_stored_record_reads_back() {
    let memory = WorkerMemory::from_json(STORED).unwrap();

    assert_eq!(memory.goal, Some(Goal::Reinforce));
    assert_eq!(memory.working, Some(true));
    assert_eq!(
        memory.targets.get(TargetKind::Reinforce),
        Some(&ObjectId::from("rampart_0012"))
    );
    assert_eq!(memory.targets.get(TargetKind::Build), None);
    assert!(memory.path.is_valid_for(&Position::new(20, 14, "W1N1")));
    assert_eq!(
        memory.path.next_step().map(|s| s.direction),
        Some(Direction::BottomRight)
    );
    assert_eq!(memory.room.as_deref(), Some("W1N1"));
}

#[test]
fn test_rewritten_record_keeps_only_known_fields() {
    let memory = WorkerMemory::from_json(STORED).unwrap();
    let rewritten: serde_json::Value = serde_json::from_str(&memory.to_json().unwrap()).unwrap();

    assert!(rewritten.get("role").is_none());
    assert_eq!(rewritten["target_harvest"], "source_0003");
    assert_eq!(rewritten["pathStep"], 1);
    assert_eq!(WorkerMemory::from_json(&memory.to_json().unwrap()).unwrap(), memory);
}

#[test]
fn test_cleared_slots_disappear_from_the_record() {
    let mut memory = WorkerMemory::from_json(STORED).unwrap();
    memory.targets.clear(TargetKind::Reinforce);
    memory.goal = None;
    memory.path.clear();

    let rewritten: serde_json::Value = serde_json::from_str(&memory.to_json().unwrap()).unwrap();
    assert!(rewritten.get("target_reinforce").is_none());
    assert!(rewritten.get("goal").is_none());
    assert!(rewritten.get("pathTarget").is_none());
    assert!(rewritten.get("pathStep").is_none());
}

#[test]
fn test_direction_numbers_round_trip() {
    let memory = WorkerMemory::from_json(STORED).unwrap();
    let rewritten: serde_json::Value = serde_json::from_str(&memory.to_json().unwrap()).unwrap();

    assert_eq!(rewritten["path"][0]["direction"], 4);
}

#[test]
fn test_out_of_range_direction_is_rejected() {
    for bad in [0, 9] {
        let record = format!(
            r#"{{ "path": [{{ "x": 11, "y": 11, "dx": 1, "dy": 1, "direction": {} }}], "pathStep": 0 }}"#,
            bad
        );
        assert!(WorkerMemory::from_json(&record).is_err());
    }
}
