//! Simulated file upload with deferred completion.
//!
//! # Responsibility
//! - Validate upload requests the way the upload dialog does.
//! - Queue accepted uploads and attach them to their project once due.
//!
//! # Invariants
//! - Every scheduled upload completes exactly once, in scheduling order.
//! - There is no cancellation: dismissing the dialog that scheduled an upload
//!   does not stop it from attaching the file.
//! - Completion is driven by the caller's event loop through `run_due`;
//!   nothing here sleeps or spawns.

use crate::config::CoreConfig;
use crate::model::project::{ProjectFile, ProjectId};
use crate::store::{EntityStore, StoreError};
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DEFAULT_MIME_TYPE: &str = "document";

/// Upload dialog input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub project_id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    /// Blank or missing MIME types are stored as `document`.
    pub mime_type: Option<String>,
    pub size: u64,
}

/// Upload request rejected before scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    MissingFileName,
    MissingProject,
    FileTooLarge { size: u64, max: u64 },
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFileName => write!(f, "file name must not be blank"),
            Self::MissingProject => write!(f, "a project must be selected"),
            Self::FileTooLarge { size, max } => {
                write!(f, "file size {size} bytes exceeds maximum {max} bytes")
            }
        }
    }
}

impl Error for UploadError {}

impl UploadRequest {
    pub fn validate(&self, max_bytes: u64) -> Result<(), UploadError> {
        if self.name.trim().is_empty() {
            return Err(UploadError::MissingFileName);
        }
        if self.project_id.trim().is_empty() {
            return Err(UploadError::MissingProject);
        }
        if self.size > max_bytes {
            return Err(UploadError::FileTooLarge {
                size: self.size,
                max: max_bytes,
            });
        }
        Ok(())
    }
}

/// Handle for one scheduled upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    pub sequence: u64,
    pub due_at: DateTime<Utc>,
}

/// Result of one completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Attached {
        ticket: UploadTicket,
        project_id: ProjectId,
        file: ProjectFile,
    },
    /// The target project could not be resolved at completion time.
    ProjectMissing {
        ticket: UploadTicket,
        error: StoreError,
    },
}

#[derive(Debug, Clone)]
struct PendingUpload {
    ticket: UploadTicket,
    request: UploadRequest,
}

/// FIFO queue of uploads waiting for their simulated delay to pass.
#[derive(Debug, Clone)]
pub struct UploadScheduler {
    delay: Duration,
    max_bytes: u64,
    next_sequence: u64,
    pending: VecDeque<PendingUpload>,
}

impl UploadScheduler {
    pub fn new(delay: Duration, max_bytes: u64) -> Self {
        Self {
            delay,
            max_bytes,
            next_sequence: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.upload_delay(), config.max_upload_bytes)
    }

    /// Validates `request` and queues it to complete at `now + delay`.
    ///
    /// # Errors
    /// - `UploadError` when the request fails validation; nothing is queued.
    pub fn schedule(
        &mut self,
        request: UploadRequest,
        now: DateTime<Utc>,
    ) -> Result<UploadTicket, UploadError> {
        request.validate(self.max_bytes).inspect_err(|err| {
            warn!("event=upload_schedule module=upload status=error error={err}");
        })?;

        let ticket = UploadTicket {
            sequence: self.next_sequence,
            due_at: now
                .checked_add_signed(self.delay)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        self.next_sequence += 1;
        info!(
            "event=upload_schedule module=upload status=ok sequence={} project_id={} size={}",
            ticket.sequence, request.project_id, request.size
        );
        self.pending.push_back(PendingUpload { ticket, request });
        Ok(ticket)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the oldest pending upload.
    pub fn next_due_at(&self) -> Option<DateTime<Utc>> {
        self.pending.front().map(|pending| pending.ticket.due_at)
    }

    /// Completes every upload due at or before `now`, attaching each file to
    /// its project.
    pub fn run_due(&mut self, now: DateTime<Utc>, store: &mut EntityStore) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::new();
        while self
            .pending
            .front()
            .is_some_and(|pending| pending.ticket.due_at <= now)
        {
            let Some(PendingUpload { ticket, request }) = self.pending.pop_front() else {
                break;
            };
            outcomes.push(complete(ticket, request, now, store));
        }
        outcomes
    }
}

fn complete(
    ticket: UploadTicket,
    request: UploadRequest,
    now: DateTime<Utc>,
    store: &mut EntityStore,
) -> UploadOutcome {
    let mime_type = request
        .mime_type
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
    let file = ProjectFile {
        id: format!("file-{}-{}", now.timestamp_millis(), ticket.sequence),
        name: request.name,
        description: request.description,
        mime_type,
        size: request.size,
        upload_date: now,
        url: format!("blob:timeflow/{}", Uuid::new_v4()),
    };

    match store.add_file_to_project(&request.project_id, file.clone()) {
        Ok(()) => {
            info!(
                "event=upload_complete module=upload status=ok sequence={} file_id={}",
                ticket.sequence, file.id
            );
            UploadOutcome::Attached {
                ticket,
                project_id: request.project_id,
                file,
            }
        }
        Err(error) => {
            warn!(
                "event=upload_complete module=upload status=error sequence={} error_code={}",
                ticket.sequence,
                error.code()
            );
            UploadOutcome::ProjectMissing { ticket, error }
        }
    }
}
