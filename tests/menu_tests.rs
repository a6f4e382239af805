use multimenu::controller::{MenuController, MenuEvent, NullRouter, Router};
use multimenu::item::ItemState;
use multimenu::node::MenuNode;
use multimenu::service::{ExpandCollapseStatus, MenuService};

use assert_matches::assert_matches;
use serde_json::json;
use serial_test::serial;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

// Test utilities

/// Router stub that reports a fixed current target and records navigations.
struct RecordingRouter {
    current: Option<String>,
    navigated: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

impl RecordingRouter {
    fn new(current: Option<&str>) -> (Self, std::sync::Arc<std::sync::Mutex<Vec<String>>>) {
        let navigated = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        (
            Self {
                current: current.map(str::to_string),
                navigated: std::sync::Arc::clone(&navigated),
            },
            navigated,
        )
    }
}

impl Router for RecordingRouter {
    fn navigate(&mut self, target: &str) {
        self.navigated.lock().unwrap().push(target.to_string());
    }

    fn current_target(&self) -> Option<String> {
        self.current.clone()
    }
}

fn controller_with_service(
    service: &MenuService,
) -> (MenuController, mpsc::UnboundedReceiver<MenuEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        MenuController::new(service.clone(), Box::new(NullRouter), tx),
        rx,
    )
}

fn holder(
    controller: &mut MenuController,
    service: &MenuService,
    id: &str,
    level: usize,
    submenu_level: usize,
) -> ItemState {
    let config = controller.config().clone();
    let generation = controller.generation();
    let node = controller
        .node_by_identifier_mut(id)
        .expect("node should be indexed");
    ItemState::new(node, level, submenu_level, generation, &config, service)
}

fn refresh_holder(
    controller: &mut MenuController,
    state: &mut ItemState,
    id: &str,
) {
    let config = controller.config().clone();
    let generation = controller.generation();
    let selection = controller.selection().cloned();
    let node = controller
        .node_by_identifier_mut(id)
        .expect("node should be indexed");
    state.refresh(node, selection.as_ref(), &config, generation);
}

#[test]
fn test_route_match_selects_home() {
    // Scenario: a one-item tree, route integration on, current URL "/".
    let service = MenuService::new();
    let (router, navigated) = RecordingRouter::new(Some("/"));
    let (tx, mut events) = mpsc::unbounded_channel();
    let mut controller = MenuController::new(service.clone(), Box::new(router), tx);
    controller.set_configuration(&json!({ "interfaceWithRoute": true }));

    controller.set_items(vec![MenuNode::new("Home").with_link("/")]).unwrap();

    assert_matches!(events.try_recv(), Ok(MenuEvent::MenuReady(_)));
    assert_matches!(events.try_recv(), Ok(MenuEvent::ItemSelected(node)) => {
        assert_eq!(node.label, "Home");
        assert!(node.is_selected);
    });
    // Resolving the current target is not a navigation.
    assert!(navigated.lock().unwrap().is_empty());
}

#[test]
fn test_collapse_on_select_folds_parent_after_child_selection() {
    // Scenario: expand Parent, select a selectable Child, and the branch
    // folds back up.
    let service = MenuService::new();
    let (tx, mut events) = mpsc::unbounded_channel();
    let mut controller = MenuController::new(service.clone(), Box::new(NullRouter), tx);
    controller.set_configuration(&json!({ "collapseOnSelect": true }));

    let mut child = MenuNode::new("Child");
    child.selectable = true;
    controller.set_items(vec![MenuNode::new("Parent").with_items(vec![child])]).unwrap();
    assert_matches!(events.try_recv(), Ok(MenuEvent::MenuReady(_)));

    let parent_id = controller.items()[0].id.clone().unwrap();
    let child_id = controller.items()[0].items.as_ref().unwrap()[0]
        .id
        .clone()
        .unwrap();

    let mut parent_state = holder(&mut controller, &service, &parent_id, 1, 0);
    let mut child_state = holder(&mut controller, &service, &child_id, 1, 1);

    // User expands Parent.
    let config = controller.config().clone();
    let outcome = parent_state.toggle(
        controller.node_by_identifier_mut(&parent_id).unwrap(),
        &config,
    );
    controller.handle_toggle(outcome);
    assert!(parent_state.is_expanded());
    // A branch toggle under collapseOnSelect is a label activation.
    assert_matches!(events.try_recv(), Ok(MenuEvent::LabelActivated(node)) => {
        assert_eq!(node.label, "Parent");
    });
    refresh_holder(&mut controller, &mut parent_state, &parent_id);
    assert!(parent_state.is_expanded());

    // User selects Child.
    let outcome = child_state.toggle(
        controller.node_by_identifier_mut(&child_id).unwrap(),
        &config,
    );
    controller.handle_toggle(outcome);
    assert_matches!(events.try_recv(), Ok(MenuEvent::ItemSelected(node)) => {
        assert_eq!(node.label, "Child");
    });

    // Selection propagation folds the matched branch.
    refresh_holder(&mut controller, &mut parent_state, &parent_id);
    assert!(!parent_state.is_expanded());
    assert_eq!(
        controller.node_by_identifier(&parent_id).unwrap().expanded,
        Some(false)
    );
}

#[test]
fn test_disabled_node_toggle_changes_nothing() {
    // Scenario: a disabled node ignores toggles entirely.
    let service = MenuService::new();
    let (mut controller, mut events) = controller_with_service(&service);

    let mut disabled = MenuNode::new("Off").with_items(vec![MenuNode::new("Inner")]);
    disabled.disabled = true;
    controller.set_items(vec![disabled]).unwrap();
    assert_matches!(events.try_recv(), Ok(MenuEvent::MenuReady(_)));

    let id = controller.items()[0].id.clone().unwrap();
    let mut state = holder(&mut controller, &service, &id, 1, 0);

    let config = controller.config().clone();
    let outcome = state.toggle(controller.node_by_identifier_mut(&id).unwrap(), &config);
    controller.handle_toggle(outcome);

    assert!(!state.is_expanded());
    assert_eq!(controller.node_by_identifier(&id).unwrap().expanded, None);
    assert_matches!(events.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn test_global_expand_reaches_collapsed_holder() {
    // Scenario: a broadcast expand transitions a collapsed holder without
    // any direct user toggle.
    let service = MenuService::new();
    let (mut controller, _events) = controller_with_service(&service);
    controller.set_items(vec![
        MenuNode::new("Branch").with_items(vec![MenuNode::new("Leaf")])
    ]).unwrap();

    let id = controller.items()[0].id.clone().unwrap();
    let mut state = holder(&mut controller, &service, &id, 1, 0);
    assert!(!state.is_expanded());

    service.set_expand_collapse_status(ExpandCollapseStatus::Expand);
    refresh_holder(&mut controller, &mut state, &id);
    assert!(state.is_expanded());
}

#[test]
fn test_empty_tree_never_becomes_ready() {
    // Scenario: empty input suspends the engine until a valid tree arrives.
    // The rejection is reported through the warning log, visible with
    // RUST_LOG=warn.
    let _ = env_logger::builder().is_test(true).try_init();
    let service = MenuService::new();
    let (mut controller, mut events) = controller_with_service(&service);

    assert_matches!(
        controller.set_items(Vec::new()),
        Err(multimenu::MenuError::EmptyTree)
    );

    assert!(!controller.is_ready());
    assert_matches!(events.try_recv(), Err(TryRecvError::Empty));
    assert!(controller.node_by_identifier("anything").is_none());
    assert!(controller.node_by_target("/").is_none());

    // A valid tree later revives it.
    controller.set_items(vec![MenuNode::new("Home").with_link("/")]).unwrap();
    assert!(controller.is_ready());
    assert_matches!(events.try_recv(), Ok(MenuEvent::MenuReady(_)));
}

#[test]
fn test_select_by_identifier_through_service_stream() {
    let service = MenuService::new();
    let (mut controller, mut events) = controller_with_service(&service);
    controller.set_items(vec![MenuNode::new("Home").with_link("/")]).unwrap();
    events.try_recv().ok();

    let id = controller.items()[0].id.clone().unwrap();
    service.select_menu_by_id(&id);
    controller.process_commands();

    assert_matches!(events.try_recv(), Ok(MenuEvent::ItemSelected(node)) => {
        assert_eq!(node.label, "Home");
    });
}

#[test]
fn test_two_controllers_on_one_service_cross_talk() {
    // One service driving two menus: the select command reaches both, and
    // only the controller that indexes the identifier reacts.
    let service = MenuService::new();
    let (mut left, mut left_events) = controller_with_service(&service);
    let (mut right, mut right_events) = controller_with_service(&service);

    left.set_items(vec![MenuNode::new("LeftHome").with_link("/left")]).unwrap();
    right.set_items(vec![MenuNode::new("RightHome").with_link("/right")]).unwrap();
    left_events.try_recv().ok();
    right_events.try_recv().ok();

    let left_id = left.items()[0].id.clone().unwrap();
    service.select_menu_by_id(&left_id);
    left.process_commands();
    right.process_commands();

    assert_matches!(left_events.try_recv(), Ok(MenuEvent::ItemSelected(_)));
    assert_matches!(right_events.try_recv(), Err(TryRecvError::Empty));
}

#[test]
#[serial]
fn test_global_service_drives_holders_of_multiple_menus() {
    // Controllers built on the process-wide service share one broadcast
    // channel by design.
    let service = multimenu::service::global().clone();
    let (tx_a, _events_a) = mpsc::unbounded_channel();
    let (tx_b, _events_b) = mpsc::unbounded_channel();
    let mut menu_a = MenuController::new(service.clone(), Box::new(NullRouter), tx_a);
    let mut menu_b = MenuController::new(service.clone(), Box::new(NullRouter), tx_b);

    menu_a.set_items(vec![
        MenuNode::new("A").with_items(vec![MenuNode::new("A1")])
    ]).unwrap();
    menu_b.set_items(vec![
        MenuNode::new("B").with_items(vec![MenuNode::new("B1")])
    ]).unwrap();

    let a_id = menu_a.items()[0].id.clone().unwrap();
    let b_id = menu_b.items()[0].id.clone().unwrap();
    let mut a_state = holder(&mut menu_a, &service, &a_id, 1, 0);
    let mut b_state = holder(&mut menu_b, &service, &b_id, 1, 0);

    service.set_expand_collapse_status(ExpandCollapseStatus::Expand);
    refresh_holder(&mut menu_a, &mut a_state, &a_id);
    refresh_holder(&mut menu_b, &mut b_state, &b_id);

    assert!(a_state.is_expanded());
    assert!(b_state.is_expanded());
}

#[test]
fn test_navigation_outcome_reaches_router() {
    let service = MenuService::new();
    let (router, navigated) = RecordingRouter::new(None);
    let (tx, mut events) = mpsc::unbounded_channel();
    let mut controller = MenuController::new(service.clone(), Box::new(router), tx);
    controller.set_configuration(&json!({ "interfaceWithRoute": true }));
    controller.set_items(vec![MenuNode::new("Docs").with_link("/docs")]).unwrap();
    events.try_recv().ok();

    let id = controller.items()[0].id.clone().unwrap();
    let mut state = holder(&mut controller, &service, &id, 1, 0);
    let config = controller.config().clone();
    let outcome = state.toggle(controller.node_by_identifier_mut(&id).unwrap(), &config);
    controller.handle_toggle(outcome);

    assert_eq!(navigated.lock().unwrap().as_slice(), ["/docs"]);
    // Navigation suppresses the selection emit.
    assert_matches!(events.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn test_callback_node_activates_label() {
    let service = MenuService::new();
    let (mut controller, mut events) = controller_with_service(&service);

    let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let calls_in_handler = std::sync::Arc::clone(&calls);
    let action = MenuNode::new("Refresh")
        .with_items(vec![MenuNode::new("Inner")])
        .with_on_selected(move |_| {
            calls_in_handler.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });
    controller.set_items(vec![action]).unwrap();
    events.try_recv().ok();

    let id = controller.items()[0].id.clone().unwrap();
    let mut state = holder(&mut controller, &service, &id, 1, 0);
    let config = controller.config().clone();
    let outcome = state.toggle(controller.node_by_identifier_mut(&id).unwrap(), &config);
    controller.handle_toggle(outcome);

    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    // Children present, so the selection is a label activation.
    assert_matches!(events.try_recv(), Ok(MenuEvent::LabelActivated(node)) => {
        assert_eq!(node.label, "Refresh");
    });
}

#[test]
fn test_route_change_after_ready_selects_new_target() {
    let service = MenuService::new();
    let (router, _navigated) = RecordingRouter::new(None);
    let (tx, mut events) = mpsc::unbounded_channel();
    let mut controller = MenuController::new(service.clone(), Box::new(router), tx);
    controller.set_configuration(&json!({ "interfaceWithRoute": true }));
    controller.set_items(vec![
        MenuNode::new("Home").with_link("/"),
        MenuNode::new("Docs").with_link("/docs"),
    ]).unwrap();
    events.try_recv().ok();

    controller.handle_route_change("/docs");
    assert_matches!(events.try_recv(), Ok(MenuEvent::ItemSelected(node)) => {
        assert_eq!(node.label, "Docs");
    });

    // Unknown targets resolve to nothing.
    controller.handle_route_change("/missing");
    assert_matches!(events.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn test_selection_highlight_propagates_along_path() {
    let service = MenuService::new();
    let (mut controller, _events) = controller_with_service(&service);
    controller.set_items(vec![MenuNode::new("Parent").with_items(vec![
        MenuNode::new("Child").with_link("/child"),
    ])]).unwrap();

    let parent_id = controller.items()[0].id.clone().unwrap();
    let child_id = controller.items()[0].items.as_ref().unwrap()[0]
        .id
        .clone()
        .unwrap();
    let mut parent_state = holder(&mut controller, &service, &parent_id, 1, 0);

    controller.select_by_identifier(&child_id).unwrap();
    refresh_holder(&mut controller, &mut parent_state, &parent_id);

    // The path auto-reveals and the parent shows as selected because the
    // selected child is a leaf.
    assert!(parent_state.is_expanded());
    assert!(parent_state.is_selected());
    let parent = controller.node_by_identifier(&parent_id).unwrap();
    assert!(parent.is_selected);
    assert!(!parent_state.item_classes().active);
}

#[test]
fn test_config_texture_flows_to_holder_styles() {
    let service = MenuService::new();
    let (mut controller, _events) = controller_with_service(&service);
    controller.set_configuration(&json!({
        "selectedListFontColor": "#ff8800",
        "highlightOnSelect": true,
    }));
    controller.set_items(vec![MenuNode::new("Home").with_link("/")]).unwrap();

    let id = controller.items()[0].id.clone().unwrap();
    let mut state = holder(&mut controller, &service, &id, 1, 0);
    controller.select_by_identifier(&id).unwrap();
    refresh_holder(&mut controller, &mut state, &id);

    let config = controller.config().clone();
    assert!(state.is_selected());
    assert_eq!(state.list_style(&config).color, "#ff8800");
}
