use std::sync::{Arc, OnceLock, RwLock};

use tracing::{info, warn};

use crate::kb::defs::KnowledgeBase;
use crate::kb::loader::{RuleLoadError, load_bundled_rules};

static STORE: OnceLock<RwLock<Arc<KnowledgeBase>>> = OnceLock::new();

/// Installs `kb` as the process-wide rule base, replacing any previous one.
pub fn install(kb: KnowledgeBase) -> Arc<KnowledgeBase> {
    let kb = Arc::new(kb);
    replace(kb.clone());
    kb
}

/// Current rule-base snapshot; loads the bundled rules on first use.
pub fn current() -> Result<Arc<KnowledgeBase>, RuleLoadError> {
    if let Some(slot) = STORE.get() {
        return Ok(read(slot));
    }
    let kb = load_bundled_rules()?;
    info!(
        version = kb.version(),
        fingerprint = %format!("{:016x}", kb.fingerprint()),
        "loaded bundled rule set"
    );
    let slot = STORE.get_or_init(|| RwLock::new(Arc::new(kb)));
    Ok(read(slot))
}

/// Replaces the whole rule base at once and returns the previous snapshot.
/// Readers holding the old `Arc` keep a consistent view until they drop it.
pub fn reload(kb: KnowledgeBase) -> Option<Arc<KnowledgeBase>> {
    replace(Arc::new(kb))
}

fn replace(next: Arc<KnowledgeBase>) -> Option<Arc<KnowledgeBase>> {
    let mut created = false;
    let slot = STORE.get_or_init(|| {
        created = true;
        RwLock::new(next.clone())
    });
    if created {
        info!(
            version = next.version(),
            fingerprint = %format!("{:016x}", next.fingerprint()),
            "rule set installed"
        );
        None
    } else {
        Some(swap(slot, next))
    }
}

fn read(slot: &RwLock<Arc<KnowledgeBase>>) -> Arc<KnowledgeBase> {
    match slot.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn swap(slot: &RwLock<Arc<KnowledgeBase>>, next: Arc<KnowledgeBase>) -> Arc<KnowledgeBase> {
    let mut guard = match slot.write() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("rule store lock poisoned, replacing snapshot");
            poisoned.into_inner()
        }
    };
    info!(
        version = next.version(),
        fingerprint = %format!("{:016x}", next.fingerprint()),
        "rule set installed"
    );
    std::mem::replace(&mut *guard, next)
}

#[cfg(test)]
#[path = "../../tests/src_inline/kb/store.rs"]
mod tests;
