/*!
 * Error types for the section1983 application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions. Soft domain outcomes
 * (no template, denied budget, rejected AI output) are plain values elsewhere;
 * the types here cover the cases a caller has to branch on.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors returned by the federal court lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CourtLookupError {
    /// City or state was blank
    #[error("City and state are required")]
    MissingLocation,

    /// No court table exists for the state
    #[error("State {0} not yet supported in court database")]
    UnsupportedState(String),
}

/// Problems with a court caption typed in by hand
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManualCourtError {
    #[error("Court information must be at least 10 characters")]
    TooShort,

    #[error("Must include \"District Court\" in the court name")]
    MissingDistrictCourt,

    #[error("Must include \"United States\" in the court name")]
    MissingUnitedStates,
}

/// Reasons a discount code cannot be applied to a checkout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscountError {
    /// Blank code submitted
    #[error("Please enter a discount code")]
    EmptyCode,

    /// Plan is not purchasable
    #[error("Invalid plan type")]
    InvalidPlan,

    /// No code with that name (case-insensitive)
    #[error("Code \"{0}\" not found. Please check spelling.")]
    NotFound(String),

    /// Code switched off by its owner or an admin
    #[error("Code is not active")]
    Inactive,

    /// `valid_from` lies in the future
    #[error("Code is not yet valid")]
    NotYetValid,

    /// `valid_until` has passed
    #[error("Code has expired")]
    Expired,

    /// `times_used >= max_uses`
    #[error("Code has reached maximum uses")]
    MaxUsesReached,
}

/// Problems creating or managing a referral code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferralCodeError {
    #[error("Please enter a referral code.")]
    Empty,

    #[error("Code must be between {min} and {max} characters.")]
    InvalidLength { min: usize, max: usize },

    #[error("Code can only contain letters, numbers, dashes, and underscores.")]
    InvalidCharacters,

    #[error("The code \"{0}\" is already taken. Please choose another.")]
    AlreadyTaken(String),

    #[error("You already have an active referral code: {0}")]
    AlreadyHasCode(String),

    #[error("Referral code not found.")]
    NotFound,
}

/// Errors raised while fetching a video transcript
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("OpenAI API key not configured. Please add OPENAI_API_KEY to environment variables.")]
    MissingApiKey,

    #[error("Invalid YouTube URL. Please provide a valid YouTube link.")]
    InvalidUrl,

    #[error("Failed to download audio. The video may be private or unavailable.")]
    DownloadFailed,

    #[error("Download timeout. The video segment may be too long.")]
    DownloadTimeout,

    #[error("Audio file was not created. Please check the video URL.")]
    MissingAudio,

    #[error("Transcription error: {0}")]
    Transcription(String),
}

impl From<ProviderError> for TranscriptError {
    fn from(error: ProviderError) -> Self {
        Self::Transcription(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the storage layer
    #[error("Database error: {0}")]
    Database(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the court lookup
    #[error("Court lookup error: {0}")]
    Court(#[from] CourtLookupError),

    /// Error from discount code validation
    #[error("Discount error: {0}")]
    Discount(#[from] DiscountError),

    /// Error from referral code management
    #[error("Referral code error: {0}")]
    Referral(#[from] ReferralCodeError),

    /// Error from transcript extraction
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Database(error.to_string())
    }
}
