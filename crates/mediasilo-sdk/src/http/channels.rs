/*
[INPUT]:  Channel models and identifiers
[OUTPUT]: Channel records and created ids
[POS]:    HTTP layer - channel endpoints
[UPDATE]: When adding channel endpoints
*/

// ### Channel Endpoints

use crate::http::paths;
use crate::http::{MediaSiloClient, Result};
use crate::types::{Channel, CreatedResponse};

impl MediaSiloClient {
    /// GET /channels/{id}
    pub async fn get_channel(&self, channel_id: &str) -> Result<Channel> {
        self.get_json(&paths::channel(channel_id), &[]).await
    }

    /// GET /channels
    pub async fn get_channels(&self) -> Result<Vec<Channel>> {
        self.get_json(paths::CHANNELS, &[]).await
    }

    /// POST /channels
    pub async fn create_channel(&self, channel: &Channel) -> Result<Channel> {
        let created: CreatedResponse = self.post_json(paths::CHANNELS, channel).await?;
        Ok(Channel {
            id: Some(created.id),
            ..channel.clone()
        })
    }

    /// PUT /channels/{id}
    pub async fn update_channel(&self, channel_id: &str, channel: &Channel) -> Result<()> {
        self.put(&paths::channel(channel_id), channel).await?;
        Ok(())
    }

    /// DELETE /channels/{id}
    pub async fn delete_channel(&self, channel_id: &str) -> Result<()> {
        self.delete(&paths::channel(channel_id)).await?;
        Ok(())
    }
}
