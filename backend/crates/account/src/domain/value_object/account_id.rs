use kernel::id::{Id, markers};

/// Identity-provider account ID
pub type AccountId = Id<markers::Account>;
