use std::path::PathBuf;

use storage::{JsonFileRepository, QuestionRepository, StorageError};

fn temp_bank(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("quiz_{}_{name}.json", std::process::id()));
    std::fs::write(&path, contents).expect("write temp bank");
    path
}

#[test]
fn json_file_loads_valid_and_rejected_entries() {
    let path = temp_bank(
        "mixed",
        r#"[
            {"question": "Should you reuse passwords?", "options": ["Yes", "No"], "answer": "No", "explanation": "One leak exposes every account."},
            "garbage",
            {"question": "Is MFA worth enabling?", "options": ["Yes", "No"], "answer": "Yes", "explanation": "It blocks most credential stuffing."}
        ]"#,
    );

    let bank = JsonFileRepository::new(&path).load_bank().unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(bank.drafts.len(), 2);
    assert_eq!(bank.rejected.len(), 1);
    assert_eq!(bank.rejected[0].index, 1);
    let record = bank.drafts[0].clone().validate().unwrap();
    assert!(record.is_correct("no"));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("quiz_definitely_missing_bank.json");
    let err = JsonFileRepository::new(path).load_bank().unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
}

#[test]
fn corrupt_file_is_a_parse_error() {
    let path = temp_bank("corrupt", "[{\"question\": ");
    let err = JsonFileRepository::new(&path).load_bank().unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, StorageError::Parse { .. }));
}
