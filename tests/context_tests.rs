//! Context Acquisition Tests
//!
//! Tests for:
//! - Alias priority walk: first success wins, order respected
//! - Error reporter invoked exactly once on exhaustion, never on success
//! - Initialization short-circuit after a failed acquisition
//! - Built-in alias list contents

use gyre::errors::GyreError;
use gyre::renderer::context::{BackendAlias, DEFAULT_ALIASES, NO_CONTEXT_MESSAGE, select_alias};

fn test_aliases() -> Vec<BackendAlias> {
    vec![
        BackendAlias {
            name: "first",
            backends: wgpu::Backends::empty(),
        },
        BackendAlias {
            name: "second",
            backends: wgpu::Backends::empty(),
        },
        BackendAlias {
            name: "third",
            backends: wgpu::Backends::empty(),
        },
    ]
}

// ============================================================================
// Success Paths
// ============================================================================

#[test]
fn first_alias_success_wins() {
    let aliases = test_aliases();
    let mut reports: Vec<String> = Vec::new();

    let (context, alias) = select_alias(&aliases, |_| Some(42u32), &mut |msg| {
        reports.push(msg.to_string());
    })
    .expect("probe always succeeds");

    assert_eq!(context, 42);
    assert_eq!(alias.name, "first");
    assert!(reports.is_empty(), "reporter must not fire on success");
}

#[test]
fn walk_stops_at_first_success() {
    let aliases = test_aliases();
    let mut probed = Vec::new();
    let mut reports: Vec<String> = Vec::new();

    let (_, alias) = select_alias(
        &aliases,
        |alias| {
            probed.push(alias.name);
            if alias.name == "second" { Some(()) } else { None }
        },
        &mut |msg| reports.push(msg.to_string()),
    )
    .expect("second alias succeeds");

    assert_eq!(alias.name, "second");
    assert_eq!(probed, vec!["first", "second"], "later aliases not probed");
    assert!(reports.is_empty());
}

#[test]
fn succeeds_iff_any_alias_yields_a_context() {
    let aliases = test_aliases();
    for winner in ["first", "second", "third"] {
        let mut reports: Vec<String> = Vec::new();
        let result = select_alias(
            &aliases,
            |alias| if alias.name == winner { Some(()) } else { None },
            &mut |msg| reports.push(msg.to_string()),
        );
        assert!(result.is_ok(), "one alias yields a context ({winner})");
        assert!(reports.is_empty());
    }
}

// ============================================================================
// Failure Paths
// ============================================================================

#[test]
fn exhaustion_reports_fixed_message_exactly_once() {
    let aliases = test_aliases();
    let mut reports: Vec<String> = Vec::new();

    let result = select_alias(&aliases, |_| None::<()>, &mut |msg| {
        reports.push(msg.to_string());
    });

    assert!(matches!(result, Err(GyreError::NoGpuContext)));
    assert_eq!(reports.len(), 1, "reporter fires exactly once");
    assert_eq!(reports[0], NO_CONTEXT_MESSAGE);
}

#[test]
fn empty_alias_list_fails_with_report() {
    let mut reports: Vec<String> = Vec::new();

    let result = select_alias(&[], |_| Some(()), &mut |msg| {
        reports.push(msg.to_string());
    });

    assert!(matches!(result, Err(GyreError::NoGpuContext)));
    assert_eq!(reports, vec![NO_CONTEXT_MESSAGE.to_string()]);
}

#[test]
fn later_stages_never_run_after_exhaustion() {
    let aliases = test_aliases();
    let mut reports: Vec<String> = Vec::new();
    let mut pipeline_built = false;
    let mut geometry_uploaded = false;

    // The initialization sequence chains on the acquisition result, so
    // a failed walk must leave every later stage untouched.
    let result = select_alias(&aliases, |_| None::<()>, &mut |msg| {
        reports.push(msg.to_string());
    })
    .map(|_| {
        pipeline_built = true;
        geometry_uploaded = true;
    });

    assert!(result.is_err());
    assert!(!pipeline_built, "shader pipeline must not be built");
    assert!(!geometry_uploaded, "geometry must not be uploaded");
    assert_eq!(reports.len(), 1);
}

// ============================================================================
// Built-in Alias List
// ============================================================================

#[test]
fn default_aliases_in_priority_order() {
    let names: Vec<&str> = DEFAULT_ALIASES.iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["vulkan", "metal", "dx12", "gl"]);
}

#[test]
fn default_aliases_each_select_one_backend() {
    for alias in &DEFAULT_ALIASES {
        assert_eq!(
            alias.backends.bits().count_ones(),
            1,
            "alias '{}' should name a single backend",
            alias.name
        );
    }
}
