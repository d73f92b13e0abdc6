use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::app_config::Config;
use crate::billing::{DiscountService, ReferralService};
use crate::database::models::{DocumentRecord, SubscriptionRecord, UserProfileRecord, UserRecord};
use crate::database::{DatabaseConnection, Repository};
use crate::enhancement::EnhancementService;
use crate::evidence::EvidenceService;
use crate::orchestrator::DocumentOrchestrator;
use crate::errors::ProviderError;
use crate::providers::{OpenAI, Provider};
use crate::sections::{DefaultSectionsReport, SectionService};
use crate::templates::{SeedReport, TemplateService};
use crate::transcript::TranscriptService;

// @module: Application controller wiring configuration, storage and services

/// Input accepted by `add-document`: the owner and the draft in one file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentBundle {
    pub user: UserRecord,
    pub profile: Option<UserProfileRecord>,
    pub subscription: Option<SubscriptionRecord>,
    pub document: DocumentRecord,
}

/// Ids created or reused by an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportedDocument {
    pub user_id: i64,
    pub document_id: i64,
    pub user_created: bool,
}

/// Main application controller
#[derive(Debug, Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,
    repo: Repository,
}

impl Controller {
    /// Open the configured database (or the default one) and wrap it
    pub fn with_config(config: Config) -> Result<Self> {
        let db = match config.database_path() {
            Some(path) => DatabaseConnection::new(&path)
                .with_context(|| format!("Failed to open database at {}", path.display()))?,
            None => DatabaseConnection::new_default()?,
        };
        debug!("Using database {}", db.path().display());
        Ok(Self::with_repository(config, Repository::new(db)))
    }

    pub fn with_repository(config: Config, repo: Repository) -> Self {
        Self { config, repo }
    }

    /// In-memory controller with default settings
    pub fn new_for_test() -> Result<Self> {
        Ok(Self::with_repository(Config::default(), Repository::new_in_memory()?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// OpenAI client when a key is configured
    fn openai(&self) -> Option<OpenAI> {
        let key = self.config.ai.get_api_key()?;
        Some(
            OpenAI::new(key, self.config.ai.endpoint.clone())
                .with_transcription_model(self.config.ai.transcription_model.clone()),
        )
    }

    /// Round trip to OpenAI; `Ok(false)` when no key is configured
    pub async fn check_ai_connection(&self) -> Result<bool, ProviderError> {
        match self.openai() {
            Some(client) => client.test_connection().await.map(|_| true),
            None => Ok(false),
        }
    }

    pub fn templates(&self) -> TemplateService {
        TemplateService::new(self.repo.clone())
    }

    pub fn sections(&self) -> SectionService {
        SectionService::new(self.repo.clone())
    }

    pub fn enhancement(&self) -> EnhancementService<OpenAI> {
        EnhancementService::new(
            self.repo.clone(),
            self.config.ai.clone(),
            self.config.billing.clone(),
            self.openai(),
        )
    }

    pub fn orchestrator(&self) -> DocumentOrchestrator<OpenAI> {
        DocumentOrchestrator::new(self.repo.clone(), self.enhancement())
    }

    pub fn discounts(&self) -> DiscountService {
        DiscountService::new(self.repo.clone(), self.config.billing.clone())
    }

    pub fn referrals(&self) -> ReferralService {
        ReferralService::new(self.repo.clone(), self.config.referral.clone())
    }

    pub fn evidence(&self) -> EvidenceService {
        EvidenceService::new(self.repo.clone())
    }

    pub fn transcripts(&self) -> TranscriptService<OpenAI> {
        TranscriptService::new(
            self.openai(),
            Duration::from_secs(self.config.ai.download_timeout_secs),
        )
    }

    /// Create the schema (done on open) and store the template catalog
    pub async fn initialize(&self) -> Result<SeedReport> {
        let report = self.templates().seed().await?;
        info!(
            "Template catalog ready: {} added, {} already present",
            report.created, report.existing
        );
        Ok(report)
    }

    /// Store a document together with its owner, reusing the user by username
    pub async fn import_document(&self, bundle: DocumentBundle) -> Result<ImportedDocument> {
        if bundle.user.username.trim().is_empty() {
            return Err(anyhow!("A username is required to import a document"));
        }

        let (user_id, user_created) = match self.repo.find_user_by_username(&bundle.user.username).await? {
            Some(existing) => (existing.id, false),
            None => (self.repo.create_user(&bundle.user).await?, true),
        };

        if let Some(mut profile) = bundle.profile {
            profile.user_id = user_id;
            self.repo.upsert_profile(&profile).await?;
        } else if self.repo.get_profile(user_id).await?.is_none() {
            self.repo
                .upsert_profile(&UserProfileRecord {
                    user_id,
                    api_cost_limit: self.config.billing.free_api_cost_limit,
                    ..Default::default()
                })
                .await?;
        }

        if let Some(mut subscription) = bundle.subscription {
            subscription.user_id = user_id;
            self.repo.upsert_subscription(&subscription).await?;
        } else if self.repo.get_subscription(user_id).await?.is_none() {
            self.repo
                .upsert_subscription(&SubscriptionRecord {
                    user_id,
                    monthly_credit_amount: self.config.billing.unlimited_monthly_credit,
                    ..Default::default()
                })
                .await?;
        }

        let mut document = bundle.document;
        document.user_id = user_id;
        let document_id = self.repo.create_document(&document).await?;
        info!("Imported document {} for user {}", document_id, bundle.user.username);

        Ok(ImportedDocument {
            user_id,
            document_id,
            user_created,
        })
    }

    /// Read a [`DocumentBundle`] from a JSON file and import it
    pub async fn import_document_file(&self, path: &Path) -> Result<ImportedDocument> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let bundle: DocumentBundle = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse document bundle {}", path.display()))?;
        self.import_document(bundle).await
    }

    /// Write boilerplate for the seven standard sections of a document
    pub async fn create_default_sections(&self, document_id: i64) -> Result<DefaultSectionsReport> {
        let document = self
            .repo
            .get_document(document_id)
            .await?
            .ok_or_else(|| anyhow!("Document {} not found", document_id))?;
        let profile = self.repo.get_profile(document.user_id).await?;
        if profile.is_none() {
            warn!("Document {} has no owner profile; using placeholders", document_id);
        }
        self.sections()
            .create_all_default_sections(&document, profile.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(username: &str) -> DocumentBundle {
        DocumentBundle {
            user: UserRecord {
                username: username.to_string(),
                ..Default::default()
            },
            document: DocumentRecord {
                title: "Roe v. Doe".to_string(),
                description: "Officer blocked my camera".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_importDocument_shouldReuseExistingUser() {
        let controller = Controller::new_for_test().unwrap();

        let first = controller.import_document(bundle("jroe")).await.unwrap();
        let second = controller.import_document(bundle("jroe")).await.unwrap();
        assert!(first.user_created);
        assert!(!second.user_created);
        assert_eq!(first.user_id, second.user_id);
        assert_ne!(first.document_id, second.document_id);

        let profile = controller.repository().get_profile(first.user_id).await.unwrap().unwrap();
        assert_eq!(profile.api_cost_limit, 0.50);
        assert!(controller.repository().get_subscription(first.user_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_importDocument_withoutUsername_shouldFail() {
        let controller = Controller::new_for_test().unwrap();
        assert!(controller.import_document(bundle("  ")).await.is_err());
    }

    #[tokio::test]
    async fn test_createDefaultSections_shouldWriteSevenSections() {
        let controller = Controller::new_for_test().unwrap();
        let imported = controller.import_document(bundle("jroe")).await.unwrap();

        let report = controller.create_default_sections(imported.document_id).await.unwrap();
        assert_eq!(report.sections_created, 7);
        assert!(controller.create_default_sections(9999).await.is_err());
    }

    #[tokio::test]
    async fn test_initialize_shouldBeIdempotent() {
        let controller = Controller::new_for_test().unwrap();
        let first = controller.initialize().await.unwrap();
        let second = controller.initialize().await.unwrap();
        assert!(first.created > 0);
        assert_eq!(second.created, 0);
        assert_eq!(second.existing, first.created);
    }
}
