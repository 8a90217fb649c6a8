use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<taskdeck_db::Database>,
}
