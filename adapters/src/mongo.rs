//! MongoDB adapter implementation of `SubmissionStore`.
//!
//! This file contains the connection settings, the on-disk document shape,
//! and the conversions between that shape and the engine-neutral
//! `Submission` model.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::models::{FindQuery, NewSubmission, SortOrder, Submission};
use crate::SubmissionStore;

const DUPLICATE_KEY_CODE: i32 = 11000;
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MongoConnection {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// Stored document layout: `_id` plus schema-style `createdAt`/`updatedAt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SubmissionDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    fullname: String,
    email: String,
    address: String,
    message: String,
    #[serde(rename = "createdAt")]
    created_at: BsonDateTime,
    #[serde(rename = "updatedAt")]
    updated_at: BsonDateTime,
}

impl SubmissionDocument {
    fn from_new(new: NewSubmission, now: DateTime<Utc>) -> Self {
        let stamp = BsonDateTime::from_chrono(now);
        Self {
            id: None,
            fullname: new.fullname,
            email: new.email,
            address: new.address,
            message: new.message,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn into_submission(self) -> Result<Submission, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::InvalidDocument("document has no _id".to_string()))?;
        Ok(Submission {
            id: id.to_hex(),
            fullname: self.fullname,
            email: self.email,
            address: self.address,
            message: self.message,
            created_at: self.created_at.to_chrono(),
            updated_at: self.updated_at.to_chrono(),
        })
    }
}

pub struct MongoStore {
    database: Database,
    collection: Collection<SubmissionDocument>,
}

impl MongoStore {
    /// Builds the client and verifies the server answers before returning.
    pub async fn new(connection: MongoConnection) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&connection.uri).await.map_err(|err| {
            StoreError::ConnectionError(format!("Invalid connection string: {}", err))
        })?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        options.connect_timeout = Some(CONNECT_TIMEOUT);

        let client = Client::with_options(options)
            .map_err(|err| StoreError::ConnectionError(err.to_string()))?;
        let database = client.database(&connection.database);
        let collection = database.collection::<SubmissionDocument>(&connection.collection);

        let store = Self {
            database,
            collection,
        };
        store.ping().await?;

        tracing::info!(
            database = %connection.database,
            collection = %connection.collection,
            "connected to MongoDB"
        );
        Ok(store)
    }
}

/// Ids that are not 24-hex ObjectIds cannot exist in the collection.
fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

fn sort_document(sort: SortOrder) -> Document {
    match sort {
        SortOrder::Ascending => doc! { "createdAt": 1, "_id": 1 },
        SortOrder::Descending => doc! { "createdAt": -1, "_id": -1 },
    }
}

fn map_write_error(err: MongoError) -> StoreError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref() {
        if write_error.code == DUPLICATE_KEY_CODE {
            return StoreError::DuplicateKey(write_error.message.clone());
        }
    }
    map_read_error(err)
}

fn map_read_error(err: MongoError) -> StoreError {
    let unreachable = matches!(
        err.kind.as_ref(),
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
    );
    if unreachable {
        StoreError::ConnectionError(err.to_string())
    } else {
        StoreError::QueryError(err.to_string())
    }
}

#[async_trait]
impl SubmissionStore for MongoStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn insert(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let mut document = SubmissionDocument::from_new(submission, Utc::now());
        let result = self
            .collection
            .insert_one(&document, None)
            .await
            .map_err(map_write_error)?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::InvalidDocument(format!(
                "inserted id is not an ObjectId: {}",
                result.inserted_id
            ))
        })?;
        document.id = Some(id);
        document.into_submission()
    }

    async fn find(&self, query: &FindQuery) -> Result<Vec<Submission>, StoreError> {
        let options = FindOptions::builder()
            .sort(sort_document(query.sort))
            .skip(query.skip)
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .build();

        let mut cursor = self
            .collection
            .find(doc! {}, options)
            .await
            .map_err(map_read_error)?;

        let mut submissions = Vec::new();
        while cursor.advance().await.map_err(map_read_error)? {
            let document = cursor
                .deserialize_current()
                .map_err(|err| StoreError::InvalidDocument(err.to_string()))?;
            submissions.push(document.into_submission()?);
        }
        Ok(submissions)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Submission>, StoreError> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": object_id }, None)
            .await
            .map_err(map_read_error)?
            .map(SubmissionDocument::into_submission)
            .transpose()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.collection
            .count_documents(doc! {}, None)
            .await
            .map_err(map_read_error)
    }

    async fn count_by_email_since(
        &self,
        email: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let filter = doc! {
            "email": email,
            "createdAt": { "$gte": BsonDateTime::from_chrono(since) },
        };
        self.collection
            .count_documents(filter, None)
            .await
            .map_err(map_read_error)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map(|_| ())
            .map_err(|err| {
                StoreError::ConnectionError(format!("Cannot reach MongoDB server: {}", err))
            })
    }
}
