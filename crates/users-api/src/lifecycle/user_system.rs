use crate::clients::UserClient;
use resource_actor::IdPolicy;
use tracing::{error, info};

/// Owns the running user actor.
pub struct UserSystem {
    /// Client for interacting with the User actor
    pub user_client: UserClient,

    /// Task handle of the actor loop (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl UserSystem {
    /// Spawns the user actor on the current Tokio runtime.
    pub fn start(buffer_size: usize, id_policy: IdPolicy) -> Self {
        let (user_actor, user_client) = crate::user_actor::new(buffer_size, id_policy);
        let handle = tokio::spawn(user_actor.run(()));

        Self {
            user_client,
            handle,
        }
    }

    /// Drops this system's client and waits for the actor to finish.
    ///
    /// Returns only after every other clone of the client has been dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down user store...");
        drop(self.user_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("User store shutdown complete.");
        Ok(())
    }
}

impl Default for UserSystem {
    fn default() -> Self {
        Self::start(32, IdPolicy::default())
    }
}
