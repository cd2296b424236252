use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use tracing::debug;

use crate::{
    demand::DemandSource,
    dispatcher::Dispatcher,
    request::BidRequest,
    result_code::ResultCode,
    targeting::{Targeting, UserKeywords},
};

type Listener = Arc<dyn Fn(ResultCode) + Send + Sync>;

/// Banner dimensions in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdSize {
    pub width: u32,
    pub height: u32,
}

impl AdSize {
    pub const fn new(width: u32, height: u32) -> Self {
        AdSize { width, height }
    }
}

impl std::fmt::Display for AdSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One placement in the host app: a config id and size, the targeting data
/// merged into its bid requests, and an optional auto-refresh timer.
///
/// The demand source is the external auction client; the user-keyword store
/// is shared, so pass clones of one [`UserKeywords`] to every unit that
/// should see the same user targeting. `fetch_demand` and
/// `set_auto_refresh_millis` spawn tasks and must be called within a tokio
/// runtime. Dropping the unit stops its timer.
pub struct AdUnit {
    config_id: String,
    size: AdSize,
    targeting: Arc<Mutex<Targeting>>,
    demand: Arc<dyn DemandSource>,
    listener: Arc<Mutex<Option<Listener>>>,
    dispatcher: Option<Dispatcher>,
}

impl AdUnit {
    pub fn new(
        config_id: impl Into<String>,
        size: AdSize,
        user_keywords: UserKeywords,
        demand: Arc<dyn DemandSource>,
    ) -> Self {
        AdUnit {
            config_id: config_id.into(),
            size,
            targeting: Arc::new(Mutex::new(Targeting::new(user_keywords))),
            demand,
            listener: Arc::new(Mutex::new(None)),
            dispatcher: None,
        }
    }

    pub fn config_id(&self) -> &str {
        &self.config_id
    }

    pub fn size(&self) -> AdSize {
        self.size
    }

    /// Issues an asynchronous demand fetch. `completion` receives the
    /// result code exactly once per issued fetch, off the caller's call
    /// stack, and is retained so auto-refresh firings report through it
    /// as well.
    pub fn fetch_demand<F>(&self, completion: F)
    where
        F: Fn(ResultCode) + Send + Sync + 'static,
    {
        *self.listener.lock().expect("listener lock poisoned") = Some(Arc::new(completion));
        issue_fetch(
            &self.config_id,
            self.size,
            &self.targeting,
            &self.demand,
            &self.listener,
        );
    }

    /// Starts auto refresh every `millis` milliseconds, replacing any
    /// active timer. Below [`crate::MIN_AUTO_REFRESH_MILLIS`] the call is
    /// rejected and the current timer state is left untouched.
    pub fn set_auto_refresh_millis(&mut self, millis: u64) {
        let config_id = self.config_id.clone();
        let size = self.size;
        let targeting = self.targeting.clone();
        let demand = self.demand.clone();
        let listener = self.listener.clone();

        let dispatcher = Dispatcher::start(millis, move || {
            issue_fetch(&config_id, size, &targeting, &demand, &listener);
        });
        if dispatcher.is_some() {
            self.dispatcher = dispatcher;
        }
    }

    /// Cancels the auto-refresh timer; no-op when inactive. An in-flight
    /// fetch from a prior firing is not cancelled.
    pub fn stop_auto_refresh(&mut self) {
        if let Some(dispatcher) = self.dispatcher.take() {
            dispatcher.stop();
        }
    }

    pub fn is_auto_refresh_active(&self) -> bool {
        self.dispatcher.is_some()
    }

    // User keywords (shared store; `key` is legacy and ignored, dedup is
    // by value alone).

    pub fn add_user_keyword(&self, key: &str, value: &str) {
        self.targeting().add_user_keyword(key, value);
    }

    pub fn add_user_keywords(&self, key: &str, values: &HashSet<String>) {
        self.targeting().add_user_keywords(key, values);
    }

    pub fn remove_user_keyword(&self, value: &str) {
        self.targeting().remove_user_keyword(value);
    }

    pub fn clear_user_keywords(&self) {
        self.targeting().clear_user_keywords();
    }

    pub fn user_keywords_set(&self) -> HashSet<String> {
        self.targeting().user_keywords_set()
    }

    // Context data (per unit).

    pub fn add_context_data(&self, key: &str, value: &str) {
        self.targeting().add_context_data(key, value);
    }

    pub fn update_context_data(&self, key: &str, values: HashSet<String>) {
        self.targeting().update_context_data(key, values);
    }

    pub fn remove_context_data(&self, key: &str) {
        self.targeting().remove_context_data(key);
    }

    pub fn clear_context_data(&self) {
        self.targeting().clear_context_data();
    }

    pub fn context_data_dictionary(&self) -> HashMap<String, HashSet<String>> {
        self.targeting().context_data_dictionary()
    }

    // Context keywords (per unit).

    pub fn add_context_keyword(&self, value: &str) {
        self.targeting().add_context_keyword(value);
    }

    pub fn add_context_keywords(&self, values: &HashSet<String>) {
        self.targeting().add_context_keywords(values);
    }

    pub fn remove_context_keyword(&self, value: &str) {
        self.targeting().remove_context_keyword(value);
    }

    pub fn clear_context_keywords(&self) {
        self.targeting().clear_context_keywords();
    }

    pub fn context_keywords_set(&self) -> HashSet<String> {
        self.targeting().context_keywords_set()
    }

    fn targeting(&self) -> std::sync::MutexGuard<'_, Targeting> {
        self.targeting.lock().expect("targeting lock poisoned")
    }
}

/// Validates the unit, snapshots its targeting, and spawns one fetch.
/// Validation failures are delivered as result codes through the same
/// completion path.
fn issue_fetch(
    config_id: &str,
    size: AdSize,
    targeting: &Arc<Mutex<Targeting>>,
    demand: &Arc<dyn DemandSource>,
    listener: &Arc<Mutex<Option<Listener>>>,
) {
    let request = {
        let targeting = targeting.lock().expect("targeting lock poisoned");
        BidRequest::new(config_id, size, &targeting)
    };
    let listener = listener.clone();
    match request {
        Ok(request) => {
            let demand = demand.clone();
            tokio::spawn(async move {
                let code = demand.fetch(request).await;
                notify(&listener, code);
            });
        }
        Err(e) => {
            let code = e.result_code();
            tokio::spawn(async move {
                notify(&listener, code);
            });
        }
    }
}

fn notify(listener: &Arc<Mutex<Option<Listener>>>, code: ResultCode) {
    let saved = listener.lock().expect("listener lock poisoned").clone();
    match saved {
        Some(completion) => completion(code),
        None => debug!(code = code.name(), "demand fetch completed without a listener"),
    }
}
