//! Workflow Integration Tests
//!
//! InteractiveWorkflow / ScriptWorkflow の統合テスト

mod common;

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use common::{
    client_secrets_fixture, signed_in, test_dependencies, write_file, RecordingDrive,
    ScriptedPrompter, StubOAuth,
};
use godrive::adapter::config::AppConfig;
use godrive::domain::errors::GodriveError;
use godrive::driver::{InteractiveWorkflow, ScriptWorkflow};

fn config_in(dir: &TempDir) -> AppConfig {
    AppConfig::new(dir.path().join(".godrive"))
}

#[tokio::test]
async fn test_directory_upload_removes_archive() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    signed_in(&config).await;

    let source = temp_dir.path().join("photos");
    write_file(&source.join("a").join("x.txt"), "x");
    write_file(&source.join("b").join("y.txt"), "y");

    let drive = Arc::new(RecordingDrive::new());
    let prompter = Arc::new(
        ScriptedPrompter::new()
            .with_confirm(false) // keep client_secrets.json
            .with_input(source.display().to_string())
            .with_input("") // original name
            .with_confirm(true), // same account
    );

    let workflow = InteractiveWorkflow::new(test_dependencies(
        &config,
        drive.clone(),
        Arc::new(StubOAuth::default()),
        prompter.clone(),
    ));
    let summary = workflow.execute(&CancellationToken::new()).await.unwrap();

    assert!(summary.is_success());
    assert_eq!(drive.names(), vec!["photos(by_godrive).zip"]);
    assert!(
        !temp_dir.path().join("photos(by_godrive).zip").exists(),
        "archive should be removed after a successful upload"
    );
    assert!(source.join("a").join("x.txt").exists());
    assert_eq!(prompter.unused_answers(), 0);

    // the uploaded bytes are a zip with the directory's files
    let (_, bytes) = drive.uploads.lock().unwrap()[0].clone();
    let zip = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut names: Vec<&str> = zip.file_names().collect();
    names.sort();
    assert_eq!(names, vec!["a/x.txt", "b/y.txt"]);
}

#[tokio::test]
async fn test_renamed_directory_keeps_zip_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    signed_in(&config).await;

    let source = temp_dir.path().join("photos");
    write_file(&source.join("beach.jpg"), "jpeg");

    let drive = Arc::new(RecordingDrive::new());
    let prompter = Arc::new(
        ScriptedPrompter::new()
            .with_confirm(false)
            .with_input(source.display().to_string())
            .with_input("holiday")
            .with_confirm(true),
    );

    let workflow = InteractiveWorkflow::new(test_dependencies(
        &config,
        drive.clone(),
        Arc::new(StubOAuth::default()),
        prompter.clone(),
    ));
    workflow.execute(&CancellationToken::new()).await.unwrap();

    assert_eq!(drive.names(), vec!["holiday.zip"]);
    assert_eq!(prompter.unused_answers(), 0);
}

#[tokio::test]
async fn test_several_paths_are_not_asked_for_a_name() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    signed_in(&config).await;

    write_file(&temp_dir.path().join("one.txt"), "1");
    write_file(&temp_dir.path().join("two.txt"), "2");
    let input = format!("{}$two.txt", temp_dir.path().join("one.txt").display());

    let drive = Arc::new(RecordingDrive::new());
    let prompter = Arc::new(
        ScriptedPrompter::new()
            .with_confirm(false)
            .with_input(input)
            .with_confirm(true),
    );

    let workflow = InteractiveWorkflow::new(test_dependencies(
        &config,
        drive.clone(),
        Arc::new(StubOAuth::default()),
        prompter.clone(),
    ));
    workflow.execute(&CancellationToken::new()).await.unwrap();

    assert_eq!(drive.names(), vec!["one.txt", "two.txt"]);
    assert_eq!(prompter.unused_answers(), 0);
}

#[tokio::test]
async fn test_failed_directory_upload_keeps_archive() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    signed_in(&config).await;

    let source = temp_dir.path().join("docs");
    write_file(&source.join("readme.md"), "# docs");

    let prompter = Arc::new(
        ScriptedPrompter::new()
            .with_confirm(false)
            .with_input(source.display().to_string())
            .with_input("")
            .with_confirm(true),
    );

    let workflow = InteractiveWorkflow::new(test_dependencies(
        &config,
        Arc::new(RecordingDrive::failing()),
        Arc::new(StubOAuth::default()),
        prompter,
    ));
    let summary = workflow.execute(&CancellationToken::new()).await.unwrap();

    assert_eq!(summary.failed_count(), 1);
    assert!(temp_dir.path().join("docs(by_godrive).zip").exists());
}

#[tokio::test]
async fn test_missing_path_exits_before_network() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    signed_in(&config).await;

    write_file(&temp_dir.path().join("present.txt"), "here");
    let input = format!(
        "{}$missing-one.txt$missing-two.txt",
        temp_dir.path().join("present.txt").display()
    );

    let drive = Arc::new(RecordingDrive::new());
    let oauth = Arc::new(StubOAuth::default());
    let prompter = Arc::new(ScriptedPrompter::new().with_confirm(false).with_input(input));

    let workflow = InteractiveWorkflow::new(test_dependencies(
        &config,
        drive.clone(),
        oauth.clone(),
        prompter,
    ));
    let err = workflow
        .execute(&CancellationToken::new())
        .await
        .unwrap_err();

    match err.downcast_ref::<GodriveError>() {
        Some(GodriveError::PathNotFound(missing)) => assert_eq!(missing.len(), 2),
        other => panic!("expected PathNotFound, got {:?}", other),
    }
    assert!(drive.names().is_empty());
    assert!(oauth.exchanged_codes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_first_run_configures_and_authenticates() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    let file = temp_dir.path().join("notes.txt");
    write_file(&file, "notes");

    let oauth = Arc::new(StubOAuth::default());
    let prompter = Arc::new(
        ScriptedPrompter::new()
            .with_paste("this is not json")
            .with_paste(client_secrets_fixture())
            .with_input(file.display().to_string())
            .with_input("")
            .with_input("http://localhost/?code=4%2Fconsent&scope=x"),
    );
    let drive = Arc::new(RecordingDrive::new());

    let workflow = InteractiveWorkflow::new(test_dependencies(
        &config,
        drive.clone(),
        oauth.clone(),
        prompter.clone(),
    ));
    workflow.execute(&CancellationToken::new()).await.unwrap();

    assert_eq!(
        fs::read_to_string(config.client_secrets_path()).unwrap(),
        client_secrets_fixture()
    );
    assert!(config.credential_path().exists());
    assert_eq!(
        oauth.exchanged_codes.lock().unwrap().as_slice(),
        ["http://localhost/?code=4%2Fconsent&scope=x"]
    );
    assert_eq!(prompter.links.lock().unwrap().len(), 1);
    assert_eq!(drive.names(), vec!["notes.txt"]);
}

#[tokio::test]
async fn test_three_invalid_configs_abort() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);

    let prompter = Arc::new(
        ScriptedPrompter::new()
            .with_paste("")
            .with_paste("[1, 2, 3]")
            .with_paste("{ not closed"),
    );

    let workflow = InteractiveWorkflow::new(test_dependencies(
        &config,
        Arc::new(RecordingDrive::new()),
        Arc::new(StubOAuth::default()),
        prompter,
    ));
    let err = workflow
        .execute(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GodriveError>(),
        Some(GodriveError::ConfigRetriesExhausted { attempts: 3 })
    ));
    assert!(!config.client_secrets_path().exists());
}

#[tokio::test]
async fn test_switching_account_runs_consent_again() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    signed_in(&config).await;
    let file = temp_dir.path().join("a.txt");
    write_file(&file, "a");

    let oauth = Arc::new(StubOAuth::default());
    let prompter = Arc::new(
        ScriptedPrompter::new()
            .with_confirm(false)
            .with_input(file.display().to_string())
            .with_input("")
            .with_confirm(false) // different account
            .with_input("4/new-account"),
    );

    let workflow = InteractiveWorkflow::new(test_dependencies(
        &config,
        Arc::new(RecordingDrive::new()),
        oauth.clone(),
        prompter.clone(),
    ));
    workflow.execute(&CancellationToken::new()).await.unwrap();

    assert_eq!(oauth.exchanged_codes.lock().unwrap().as_slice(), ["4/new-account"]);
    assert!(config.credential_path().exists());
    assert_eq!(prompter.unused_answers(), 0);
}

#[tokio::test]
async fn test_script_custom_name_keeps_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    signed_in(&config).await;
    let file = temp_dir.path().join("report.pdf");
    write_file(&file, "%PDF-1.4");

    let drive = Arc::new(RecordingDrive::new());
    let workflow = ScriptWorkflow::new(test_dependencies(
        &config,
        drive.clone(),
        Arc::new(StubOAuth::default()),
        Arc::new(ScriptedPrompter::new()),
    ));

    let report = workflow
        .execute(
            &file.display().to_string(),
            Some("final".to_string()),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(drive.names(), vec!["final.pdf"]);
    assert!(file.exists());
}

#[tokio::test]
async fn test_script_failure_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    signed_in(&config).await;
    let file = temp_dir.path().join("report.pdf");
    write_file(&file, "%PDF-1.4");

    let workflow = ScriptWorkflow::new(test_dependencies(
        &config,
        Arc::new(RecordingDrive::failing()),
        Arc::new(StubOAuth::default()),
        Arc::new(ScriptedPrompter::new()),
    ));

    let err = workflow
        .execute(&file.display().to_string(), None, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<GodriveError>(),
        Some(GodriveError::UploadFailed(_))
    ));
}

#[tokio::test]
async fn test_cancelled_run_reports_cancellation() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let workflow = InteractiveWorkflow::new(test_dependencies(
        &config,
        Arc::new(RecordingDrive::new()),
        Arc::new(StubOAuth::default()),
        Arc::new(ScriptedPrompter::new()),
    ));

    let err = workflow.execute(&cancel).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GodriveError>(),
        Some(GodriveError::Cancelled)
    ));
}
