use crate::modules::conversation::model::Conversation;
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

const COLLECTION_NAME: &str = "conversations";
const CACHE_TTL: u64 = 3600; // 1 hour

pub struct ConversationCrud {
    collection: Collection<Conversation>,
    redis: ConnectionManager,
}

impl ConversationCrud {
    pub fn new(db: &Database, redis: ConnectionManager) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
            redis,
        }
    }

    fn cache_key(id: &ObjectId) -> String {
        format!("conversation:{}", id.to_hex())
    }

    pub async fn create(&self, conversation: Conversation) -> Result<ObjectId, mongodb::error::Error> {
        let result = self.collection.insert_one(conversation).await?;
        Ok(result.inserted_id.as_object_id().unwrap())
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Conversation>, mongodb::error::Error> {
        // Try cache first
        let cache_key = Self::cache_key(id);
        let mut redis = self.redis.clone();

        if let Ok(cached) = redis.get::<_, String>(&cache_key).await {
            if let Ok(conversation) = serde_json::from_str::<Conversation>(&cached) {
                return Ok(Some(conversation));
            }
        }

        // Fallback to database
        let conversation = self.collection.find_one(doc! { "_id": id }).await?;

        // Cache the result
        if let Some(ref c) = conversation {
            if let Ok(json) = serde_json::to_string(c) {
                let _: Result<(), _> = redis.set_ex(&cache_key, json, CACHE_TTL).await;
            }
        }

        Ok(conversation)
    }

    pub async fn find_by_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<Conversation>, mongodb::error::Error> {
        use futures::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?;

        cursor.try_collect().await
    }

    pub async fn count_for_user(&self, user_id: &str) -> Result<u64, mongodb::error::Error> {
        self.collection
            .count_documents(doc! { "user_id": user_id })
            .await
    }

    pub async fn update_summary(
        &self,
        id: &ObjectId,
        ai_summary: String,
    ) -> Result<bool, mongodb::error::Error> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "ai_summary": ai_summary, "updated_at": bson::DateTime::now() } },
            )
            .await?;

        // Invalidate cache
        let cache_key = Self::cache_key(id);
        let mut redis = self.redis.clone();
        let _: Result<(), _> = redis.del(&cache_key).await;

        Ok(result.modified_count > 0)
    }
}
