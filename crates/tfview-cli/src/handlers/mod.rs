pub mod refresh;

use crate::config::Config;
use std::sync::Arc;
use tfview_views::View;

/// Shared state every command handler starts from.
pub struct HandlerContext {
    pub view: Arc<View>,
    pub config: Config,
}

impl HandlerContext {
    pub fn new(view: Arc<View>, config: Config) -> Self {
        Self { view, config }
    }
}
