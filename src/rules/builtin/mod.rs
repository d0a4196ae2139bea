pub mod sagemaker;

use crate::engine::Rule;
use std::sync::{Arc, LazyLock};

static ALL_RULES: LazyLock<Vec<Arc<dyn Rule>>> =
    LazyLock::new(|| vec![Arc::new(sagemaker::NotebookDirectInternetAccess)]);

pub fn all_rules() -> &'static [Arc<dyn Rule>] {
    &ALL_RULES
}
