/*!
 * Common test utilities for the section1983 test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use section1983::app_controller::{DocumentBundle, ImportedDocument};
use section1983::database::models::{DocumentRecord, UserRecord};
use section1983::Controller;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A recording-interference incident on a public sidewalk
pub fn sample_bundle(username: &str) -> DocumentBundle {
    DocumentBundle {
        user: UserRecord {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            first_name: "Jane".to_string(),
            last_name: "Roe".to_string(),
            ..Default::default()
        },
        document: DocumentRecord {
            title: "Roe v. City of Pittsburgh".to_string(),
            description: "An officer ordered me to stop filming and grabbed my phone while I was recording"
                .to_string(),
            incident_location: "public sidewalk on Grant Street".to_string(),
            incident_city: "Pittsburgh".to_string(),
            incident_state: "PA".to_string(),
            defendants: "Officer John Doe".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Route library logs through env_logger; safe to call from every test
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Controller on an in-memory database with the template catalog loaded
pub async fn seeded_controller() -> Result<Controller> {
    init_test_logger();
    let controller = Controller::new_for_test()?;
    controller.initialize().await?;
    Ok(controller)
}

/// Seeded controller plus one imported sample document
pub async fn controller_with_document() -> Result<(Controller, ImportedDocument)> {
    let controller = seeded_controller().await?;
    let imported = controller.import_document(sample_bundle("jroe")).await?;
    Ok((controller, imported))
}
