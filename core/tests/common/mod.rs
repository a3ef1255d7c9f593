//! Shared setup for the scenario tests.
//!
//! Every `Suite` talks to its own mock server on a random port, so tests
//! can run in parallel without clearing each other's data.

#![allow(dead_code)]

use std::sync::Arc;

use mock_server::MockConfig;
use todo_harness::factory::constants::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use todo_harness::{
    CleanupPolicy, FixtureLifecycle, HarnessConfig, SuiteGuard, TestDataFactory, TodoApi,
    TodoItem,
};

/// Start the mock server on a random port and return its base URL.
pub fn spawn_mock(config: MockConfig) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, config).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

pub struct Suite {
    pub api: Arc<TodoApi>,
    pub factory: TestDataFactory,
    pub config: HarnessConfig,
    guard: SuiteGuard<Arc<TodoApi>>,
}

impl Suite {
    pub fn start(name: &str) -> Self {
        Self::start_with(name, MockConfig::default(), |_| {})
    }

    pub fn start_with(
        name: &str,
        mock: MockConfig,
        tune: impl FnOnce(&mut HarnessConfig),
    ) -> Self {
        todo_harness::init_logging("debug");

        let mut config = HarnessConfig::for_base_url(spawn_mock(mock));
        tune(&mut config);
        let api = Arc::new(TodoApi::from_config(&config));
        let policy = CleanupPolicy::from_config(&config).unwrap();
        let lifecycle = FixtureLifecycle::new(api.clone(), policy).unwrap();

        Self {
            api,
            factory: TestDataFactory::default(),
            config,
            guard: SuiteGuard::new(name, lifecycle),
        }
    }

    pub fn lifecycle(&self) -> &FixtureLifecycle<Arc<TodoApi>> {
        self.guard.lifecycle()
    }

    /// Pre-test hook.
    pub fn before_each(&self, test: &str) {
        self.guard.before_each(test).unwrap();
    }

    /// After-suite hook; panics if the collection cannot be emptied.
    pub fn finish(self) {
        self.guard.finish();
    }

    /// Skip the after-suite hook.
    pub fn dismiss(self) {
        self.guard.dismiss();
    }

    /// Create `item` and return the copy the service lists back.
    pub fn create_and_find(&self, item: &TodoItem) -> TodoItem {
        self.api.create(item).unwrap();
        let todos = self.api.list(DEFAULT_OFFSET, DEFAULT_LIMIT).unwrap();
        assert!(!todos.is_empty(), "todo list is empty after creation");
        todos
            .into_iter()
            .find(|todo| todo.text() == item.text())
            .expect("created todo not found in the list")
    }

    pub fn create_numbered(&self, total: i64) {
        for n in 1..=total {
            self.api.create(&TestDataFactory::numbered(n)).unwrap();
        }
    }
}
