//! The user location slice running inside the effect runtime

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use slice_dispatch::EffectRuntime;
use tokio::sync::oneshot;
use tokio::time::timeout;

use user_locations::api::{ApiError, InMemoryApi, UserLocationApi};
use user_locations::model::{CreateUserLocationPayload, UserLocation, UserLocationId};
use user_locations::user_location::selectors::{
    get_user_locations, is_active, is_loading, is_registration_dialog_open, registration_error,
};
use user_locations::user_location::{
    close_user_location_registration_dialog, create_user_location, fetch_user_locations,
    open_user_location_registration_dialog, toggle_user_location_selection, UserLocationAction,
    UserLocationEpics,
};
use user_locations::{handle_effect, reducer, Action, AppState, Effect};

type Reply<T> = oneshot::Sender<Result<T, ApiError>>;
type Pending<T> = oneshot::Receiver<Result<T, ApiError>>;

/// API whose answers are handed in by the test, one per call
#[derive(Default)]
struct ScriptedApi {
    fetches: Mutex<VecDeque<Pending<Vec<UserLocation>>>>,
    creates: Mutex<VecDeque<Pending<UserLocation>>>,
    fetch_calls: AtomicUsize,
}

impl ScriptedApi {
    fn script_fetch(&self) -> Reply<Vec<UserLocation>> {
        let (tx, rx) = oneshot::channel();
        self.fetches.lock().unwrap().push_back(rx);
        tx
    }

    fn script_create(&self) -> Reply<UserLocation> {
        let (tx, rx) = oneshot::channel();
        self.creates.lock().unwrap().push_back(rx);
        tx
    }

    async fn wait_for_fetch_calls(&self, n: usize) {
        timeout(Duration::from_secs(1), async {
            while self.fetch_calls.load(Ordering::SeqCst) < n {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("fetch was not called");
    }
}

async fn answer<T>(pending: Option<Pending<T>>) -> Result<T, ApiError> {
    match pending {
        Some(rx) => rx
            .await
            .unwrap_or_else(|_| Err(ApiError::Transport("reply dropped".into()))),
        None => Err(ApiError::Transport("unscripted call".into())),
    }
}

impl UserLocationApi for ScriptedApi {
    async fn fetch_user_locations(&self) -> Result<Vec<UserLocation>, ApiError> {
        let pending = self.fetches.lock().unwrap().pop_front();
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        answer(pending).await
    }

    async fn create_user_location(
        &self,
        _payload: CreateUserLocationPayload,
    ) -> Result<UserLocation, ApiError> {
        let pending = self.creates.lock().unwrap().pop_front();
        answer(pending).await
    }
}

struct Harness<C: UserLocationApi> {
    runtime: EffectRuntime<AppState, Action, Effect>,
    epics: UserLocationEpics<C>,
    api: Arc<C>,
}

impl<C: UserLocationApi> Harness<C> {
    fn new(api: C) -> Self {
        let api = Arc::new(api);
        Self {
            runtime: EffectRuntime::new(AppState::default(), reducer),
            epics: UserLocationEpics::new(Arc::clone(&api)),
            api,
        }
    }

    fn state(&self) -> &AppState {
        self.runtime.state()
    }

    fn dispatch(&mut self, action: impl Into<Action>) -> bool {
        let epics = &self.epics;
        self.runtime
            .dispatch(action.into(), &mut |effect, ctx| handle_effect(epics, effect, ctx))
    }

    async fn settle(&mut self) -> usize {
        let epics = &self.epics;
        timeout(
            Duration::from_secs(2),
            self.runtime
                .run_until_idle(|effect, ctx| handle_effect(epics, effect, ctx)),
        )
        .await
        .expect("runtime did not settle")
    }
}

fn loc(id: &str) -> UserLocation {
    UserLocation::new(id, id.to_uppercase(), 0.0, 0.0)
}

fn payload(name: &str) -> CreateUserLocationPayload {
    CreateUserLocationPayload {
        name: name.into(),
        latitude: 10.0,
        longitude: 20.0,
    }
}

#[tokio::test]
async fn fetch_selects_everything_then_toggle() {
    let mut h = Harness::new(ScriptedApi::default());
    let reply = h.api.script_fetch();

    h.dispatch(fetch_user_locations());
    assert!(is_loading(h.state()));

    reply.send(Ok(vec![loc("a"), loc("b")])).unwrap();
    h.settle().await;

    assert!(!is_loading(h.state()));
    assert_eq!(get_user_locations(h.state()), &[loc("a"), loc("b")]);
    assert!(is_active(h.state(), &UserLocationId::from("a")));
    assert!(is_active(h.state(), &UserLocationId::from("b")));

    h.dispatch(toggle_user_location_selection("a"));
    assert!(!is_active(h.state(), &UserLocationId::from("a")));
    assert_eq!(
        h.state().user_location.active_user_location_ids,
        vec![UserLocationId::from("b")]
    );
}

#[tokio::test]
async fn newer_fetch_wins_over_older_in_flight() {
    let mut h = Harness::new(ScriptedApi::default());
    let first = h.api.script_fetch();
    let second = h.api.script_fetch();

    h.dispatch(fetch_user_locations());
    h.api.wait_for_fetch_calls(1).await;
    h.dispatch(fetch_user_locations());
    h.api.wait_for_fetch_calls(2).await;

    second.send(Ok(vec![loc("new")])).unwrap();
    // The first task is aborted, its reply may have nowhere to go
    let _ = first.send(Ok(vec![loc("old")]));

    assert_eq!(h.settle().await, 1);
    assert_eq!(get_user_locations(h.state()), &[loc("new")]);
    assert!(!is_loading(h.state()));
}

#[tokio::test]
async fn result_finished_before_newer_request_is_discarded() {
    let mut h = Harness::new(ScriptedApi::default());
    let first = h.api.script_fetch();
    let second = h.api.script_fetch();

    h.dispatch(fetch_user_locations());
    h.api.wait_for_fetch_calls(1).await;
    first.send(Ok(vec![loc("old")])).unwrap();
    // Let the first task finish and queue its result
    tokio::time::sleep(Duration::from_millis(20)).await;

    h.dispatch(fetch_user_locations());
    second.send(Ok(vec![loc("new")])).unwrap();
    h.settle().await;

    assert_eq!(get_user_locations(h.state()), &[loc("new")]);
}

#[tokio::test]
async fn fetch_failure_raises_alert() {
    let mut h = Harness::new(ScriptedApi::default());
    let reply = h.api.script_fetch();

    h.dispatch(fetch_user_locations());
    reply
        .send(Err(ApiError::Transport("connection refused".into())))
        .unwrap();
    h.settle().await;

    assert!(!is_loading(h.state()));
    assert_eq!(
        h.state().alert.as_deref(),
        Some("request failed: connection refused")
    );

    h.dispatch(Action::AlertDismiss);
    assert_eq!(h.state().alert, None);
}

#[tokio::test]
async fn create_failure_shows_in_open_dialog() {
    let mut h = Harness::new(ScriptedApi::default());
    let reply = h.api.script_create();

    h.dispatch(open_user_location_registration_dialog());
    h.dispatch(create_user_location(payload("Home")));
    reply.send(Err(ApiError::Rejected("bad".into()))).unwrap();
    h.settle().await;

    assert!(is_registration_dialog_open(h.state()));
    assert_eq!(registration_error(h.state()), Some("bad"));
}

#[tokio::test]
async fn create_success_appends_and_closes() {
    let mut h = Harness::new(ScriptedApi::default());
    let fetch = h.api.script_fetch();
    let create = h.api.script_create();

    h.dispatch(fetch_user_locations());
    fetch.send(Ok(vec![loc("a")])).unwrap();
    h.settle().await;

    h.dispatch(open_user_location_registration_dialog());
    h.dispatch(create_user_location(payload("Home")));
    create
        .send(Ok(UserLocation::new("h", "Home", 10.0, 20.0)))
        .unwrap();
    h.settle().await;

    assert!(!is_registration_dialog_open(h.state()));
    assert_eq!(
        get_user_locations(h.state()).last().map(|l| l.name.as_str()),
        Some("Home")
    );
}

#[tokio::test]
async fn late_create_failure_after_close_is_dropped() {
    let mut h = Harness::new(ScriptedApi::default());
    let reply = h.api.script_create();

    h.dispatch(open_user_location_registration_dialog());
    h.dispatch(create_user_location(payload("Home")));
    h.dispatch(close_user_location_registration_dialog());
    let before = h.state().clone();

    reply.send(Err(ApiError::Rejected("bad".into()))).unwrap();
    h.settle().await;

    assert_eq!(h.state(), &before);
    assert!(!is_registration_dialog_open(h.state()));
}

#[tokio::test]
async fn fetch_and_create_do_not_cancel_each_other() {
    let mut h = Harness::new(ScriptedApi::default());
    let fetch = h.api.script_fetch();
    let create = h.api.script_create();

    h.dispatch(open_user_location_registration_dialog());
    h.dispatch(fetch_user_locations());
    h.dispatch(create_user_location(payload("Home")));

    create
        .send(Ok(UserLocation::new("h", "Home", 10.0, 20.0)))
        .unwrap();
    fetch.send(Ok(vec![loc("a")])).unwrap();
    assert_eq!(h.settle().await, 2);

    assert!(!is_loading(h.state()));
    assert!(!is_registration_dialog_open(h.state()));
    assert!(get_user_locations(h.state())
        .iter()
        .any(|l| l.id == UserLocationId::from("a")));
}

#[tokio::test]
async fn in_memory_backend_round_trip() {
    let mut h = Harness::new(InMemoryApi::with_sample_data());

    h.dispatch(UserLocationAction::FetchRequest);
    h.settle().await;
    assert_eq!(get_user_locations(h.state()).len(), 3);

    h.dispatch(open_user_location_registration_dialog());
    h.dispatch(create_user_location(payload("   ")));
    h.settle().await;
    assert_eq!(registration_error(h.state()), Some("name must not be empty"));

    h.dispatch(create_user_location(payload("Oslo")));
    h.settle().await;
    assert!(!is_registration_dialog_open(h.state()));
    assert_eq!(get_user_locations(h.state()).len(), 4);

    // A refetch re-selects everything, including the new one
    h.dispatch(fetch_user_locations());
    h.settle().await;
    assert_eq!(h.state().user_location.active_user_location_ids.len(), 4);
}

struct PanickingApi;

impl UserLocationApi for PanickingApi {
    async fn fetch_user_locations(&self) -> Result<Vec<UserLocation>, ApiError> {
        panic!("client blew up")
    }

    async fn create_user_location(
        &self,
        _payload: CreateUserLocationPayload,
    ) -> Result<UserLocation, ApiError> {
        panic!("client blew up")
    }
}

#[tokio::test]
async fn panicking_client_still_ends_loading() {
    let mut h = Harness::new(PanickingApi);

    h.dispatch(fetch_user_locations());
    assert!(is_loading(h.state()));
    h.settle().await;

    assert!(!is_loading(h.state()));
    assert_eq!(
        h.state().alert.as_deref(),
        Some("API client failed unexpectedly")
    );
}
