//! End-to-end session tests against the public API, using collaborator
//! doubles so no git repository or network access is needed.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use results_logger::error::Error;
use results_logger::provenance::VersionControl;
use results_logger::store::ArtifactStore;
use results_logger::ResultLogger;

struct StubVc;

impl VersionControl for StubVc {
    fn remote_url(&self) -> Result<String, Error> {
        Ok("https://github.com/ai-unc/pipeline.git".to_string())
    }

    fn commit_all(&self, _message: &str) -> Result<(), Error> {
        Ok(())
    }

    fn head_commit(&self) -> Result<String, Error> {
        Ok("0123456789abcdef0123456789abcdef01234567".to_string())
    }

    fn head_author(&self) -> Result<String, Error> {
        Ok("Test Author <author@example.com>".to_string())
    }
}

#[derive(Debug)]
struct Upload {
    owner: String,
    repo: String,
    timestamp: String,
    message: String,
    csv: String,
}

#[derive(Clone, Default)]
struct CapturingStore {
    uploads: Arc<Mutex<Vec<Upload>>>,
}

impl ArtifactStore for CapturingStore {
    fn upload(
        &self,
        owner: &str,
        repo: &str,
        timestamp: &str,
        message: &str,
        csv: &str,
    ) -> Result<(), Error> {
        self.uploads.lock().expect("uploads lock").push(Upload {
            owner: owner.to_string(),
            repo: repo.to_string(),
            timestamp: timestamp.to_string(),
            message: message.to_string(),
            csv: csv.to_string(),
        });
        Ok(())
    }
}

#[test]
fn two_row_session_produces_the_contract_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CapturingStore::default();
    let mut logger = ResultLogger::with_collaborators(
        true,
        &StubVc,
        Box::new(store.clone()),
        dir.path().to_path_buf(),
    )
    .expect("construct logger");
    assert!(logger.is_enabled());

    logger.log_result("doc1", "cause", "effect", "+", "+");
    logger.log_result("doc2", "cause2", "effect2", "+", "-");
    logger.save_results().expect("save results");

    let uploads = store.uploads.lock().expect("uploads lock");
    assert_eq!(uploads.len(), 1);
    let upload = &uploads[0];

    assert_eq!(upload.owner, "ai-unc");
    assert_eq!(upload.repo, "pipeline");
    assert!(upload.message.starts_with("Automated Commit by Test Suite v"));

    // The sheet separates metadata from data rows with a blank line.
    assert!(upload.csv.contains("\n\n"));

    // Parse the sheet back; the reader skips the blank separator line.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(upload.csv.as_bytes());
    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("parse sheet");

    assert_eq!(records.len(), 8);
    assert_eq!(&records[0][0], "Pipeline");
    assert_eq!(
        &records[0][1],
        "https://github.com/ai-unc/pipeline/commit/0123456789abcdef0123456789abcdef01234567"
    );
    assert_eq!(&records[1][0], "Executed By");
    assert_eq!(&records[1][1], "Test Author <author@example.com>");
    assert_eq!(&records[2][0], "Date");
    assert_eq!(&records[2][1], upload.timestamp);
    assert_eq!(&records[3][0], "Runtime");
    assert_eq!(&records[4][0], "Total Documents");
    assert_eq!(&records[4][1], "2");
    assert_eq!(&records[5][0], "Document Name");
    assert_eq!(&records[5][4], "Coded Classification");
    assert_eq!(
        records[6].iter().collect::<Vec<_>>(),
        vec!["doc1", "cause", "effect", "+", "+"]
    );
    assert_eq!(
        records[7].iter().collect::<Vec<_>>(),
        vec!["doc2", "cause2", "effect2", "+", "-"]
    );

    // Successful upload leaves no fallback file behind.
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn disabled_logger_writes_nothing_anywhere() {
    let before = std::env::current_dir().expect("cwd");
    let mut logger = ResultLogger::disabled();
    logger.log_result("doc1", "cause", "effect", "+", "+");
    logger.log_result("doc1", "cause", "effect", "-", "-");
    logger.save_results().expect("disabled save");
    // No fallback artifact appears in the working directory.
    let stray: Vec<_> = std::fs::read_dir(before)
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("local_")
        })
        .collect();
    assert!(stray.is_empty());
}

#[test]
fn version_control_failure_surfaces_diagnostics() {
    struct BrokenVc;
    impl VersionControl for BrokenVc {
        fn remote_url(&self) -> Result<String, Error> {
            Err(Error::VersionControl(
                "fatal: not a git repository".to_string(),
            ))
        }
        fn commit_all(&self, _message: &str) -> Result<(), Error> {
            unreachable!("construction fails before committing")
        }
        fn head_commit(&self) -> Result<String, Error> {
            unreachable!()
        }
        fn head_author(&self) -> Result<String, Error> {
            unreachable!()
        }
    }

    let result = ResultLogger::with_collaborators(
        false,
        &BrokenVc,
        Box::new(CapturingStore::default()),
        PathBuf::from("."),
    );
    let err = result.err().expect("construction should fail");
    match err {
        Error::VersionControl(detail) => {
            assert!(detail.contains("not a git repository"));
        }
        other => panic!("expected version control failure, got {other}"),
    }
}
