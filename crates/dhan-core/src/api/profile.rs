use crate::client::endpoints::PROFILE;
use crate::client::DhanClient;
use crate::domain::Profile;
use crate::error::DhanError;

impl DhanClient {
    pub async fn profile(&self) -> Result<Profile, DhanError> {
        self.get_data(PROFILE).await
    }
}
