use crate::gateway::ApiGateway;
use crate::session::PlanSession;
use crate::store::RecordStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything one signed-in user's pages share: the API they talk to, the
/// cached records and the plan being worked through.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ApiGateway>,
    pub store: Arc<Mutex<RecordStore>>,
    pub session: Arc<Mutex<PlanSession>>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            store: Arc::new(Mutex::new(RecordStore::default())),
            session: Arc::new(Mutex::new(PlanSession::new())),
        }
    }
}
