//! Tests for the tree maintenance algorithms
//!
//! Covers sibling indexing, parent-link propagation, flattening, duration
//! roll-up, root lookup, and the bounds-checked accessors.

use super::common::*;
use day_planner::error::PlannerError;
use day_planner::tasks::{
    add_child, flatten, get_root, propagate_supertasks, reindex, remove_child, set_supertask,
    update_estimated_minutes, NodeHandle, NodeId, Subtask, SupertaskKind, TaggedEntity, Task,
};

// ============================================================================
// Indexing
// ============================================================================

#[test]
fn reindex_assigns_contiguous_one_based_indices() {
    let (task, a, b, b1) = sample_tree();
    let root = NodeHandle::task(&task);
    reindex(&root);
    assert_eq!(a.borrow().index, 1);
    assert_eq!(b.borrow().index, 2);
    assert_eq!(b1.borrow().index, 1);
}

#[test]
fn add_child_defers_reindexing() {
    let task = Task::new("bulk").unwrap();
    let root = NodeHandle::task(&task);
    add_child(&root, leaf("x", 0));
    add_child(&root, leaf("y", 0));
    // Two-phase protocol: nothing is numbered until reindex runs.
    assert_eq!(task.borrow().subtasks[0].borrow().index, 0);
    assert_eq!(task.borrow().subtasks[1].borrow().index, 0);
    reindex(&root);
    assert_eq!(task.borrow().subtasks[0].borrow().index, 1);
    assert_eq!(task.borrow().subtasks[1].borrow().index, 2);
}

#[test]
fn remove_child_reindexes_remaining_siblings() {
    let task = Task::new("list").unwrap();
    let root = NodeHandle::task(&task);
    let first = leaf("first", 0);
    let second = leaf("second", 0);
    let third = leaf("third", 0);
    add_child(&root, first.clone());
    add_child(&root, second.clone());
    add_child(&root, third.clone());
    reindex(&root);

    let removed = remove_child(&root, 1).unwrap();
    assert_eq!(removed.borrow().name, "second");
    assert_eq!(task.borrow().subtasks.len(), 2);
    assert_eq!(task.borrow().subtasks[0].borrow().name, "first");
    assert_eq!(task.borrow().subtasks[1].borrow().name, "third");
    assert_eq!(first.borrow().index, 1);
    assert_eq!(third.borrow().index, 2);
}

#[test]
fn remove_child_out_of_range_fails() {
    let (task, _, _, _) = sample_tree();
    let root = NodeHandle::task(&task);
    let err = remove_child(&root, 2).unwrap_err();
    assert!(matches!(
        err,
        PlannerError::IndexOutOfBounds { index: 2, len: 2 }
    ));
}

#[test]
fn remove_last_child_restores_leaf_state() {
    let (_, _, b, _) = sample_tree();
    let parent = NodeHandle::subtask(&b);
    remove_child(&parent, 0).unwrap();
    assert!(!b.borrow().has_subtasks);
    assert!(b.borrow().subtasks.is_empty());
}

// ============================================================================
// Parent links
// ============================================================================

#[test]
fn set_supertask_copies_denormalized_identity() {
    let task = Task::new("root").unwrap();
    task.borrow_mut().id = NodeId::from(7);
    let child = leaf("child", 0);
    set_supertask(&child, &NodeHandle::task(&task));
    assert_eq!(child.borrow().supertask_id, Some(NodeId::from(7)));
    assert_eq!(child.borrow().supertask_kind, Some(SupertaskKind::Task));
}

#[test]
fn propagate_supertasks_wires_whole_subtree() {
    let task = Task::new("root").unwrap();
    // Bulk-replace the child list without add_child, as the reconstructor's
    // caller does, then propagate.
    let b = leaf("B", 0);
    let b1 = leaf("B1", 0);
    b.borrow_mut().subtasks.push(b1.clone());
    b.borrow_mut().has_subtasks = true;
    task.borrow_mut().subtasks.push(b.clone());

    let root = NodeHandle::task(&task);
    propagate_supertasks(&root);

    assert_eq!(b.borrow().supertask_kind, Some(SupertaskKind::Task));
    assert_eq!(b1.borrow().supertask_kind, Some(SupertaskKind::Subtask));
    assert!(get_root(&b1).is_ok());
}

#[test]
fn get_root_ascends_three_level_chain() {
    let (task, _, _, b1) = sample_tree();
    let found = get_root(&b1).unwrap();
    assert_eq!(found.borrow().name, task.borrow().name);
}

#[test]
fn get_root_without_wiring_is_broken_chain() {
    let orphan = Subtask::new("orphan").unwrap();
    assert!(matches!(
        get_root(&orphan),
        Err(PlannerError::BrokenChain)
    ));
}

#[test]
fn get_root_with_dropped_parent_is_broken_chain() {
    let child = {
        let task = Task::new("ephemeral").unwrap();
        let child = leaf("child", 0);
        set_supertask(&child, &NodeHandle::task(&task));
        child
        // task dropped here; the weak link dangles
    };
    assert!(matches!(
        get_root(&child),
        Err(PlannerError::BrokenChain)
    ));
}

// ============================================================================
// Flattening
// ============================================================================

#[test]
fn flatten_returns_strict_descendants_in_preorder() {
    let (task, a, b, b1) = sample_tree();
    let flat = flatten(&NodeHandle::task(&task));
    let names: Vec<String> = flat.iter().map(|n| n.borrow().name.clone()).collect();
    assert_eq!(names, vec!["A", "B", "B1"]);
    // Same handles, not copies.
    assert!(std::rc::Rc::ptr_eq(&flat[0], &a));
    assert!(std::rc::Rc::ptr_eq(&flat[1], &b));
    assert!(std::rc::Rc::ptr_eq(&flat[2], &b1));
}

#[test]
fn flatten_of_leaf_only_tree_is_empty() {
    let task = Task::new("leafless").unwrap();
    assert!(flatten(&NodeHandle::task(&task)).is_empty());
}

// ============================================================================
// Duration roll-up
// ============================================================================

#[test]
fn update_estimated_minutes_rolls_up_bottom_up() {
    let (task, a, b, b1) = sample_tree();
    let total = update_estimated_minutes(&NodeHandle::task(&task));
    // Leaves untouched; B's declared 20 is overwritten by its child sum.
    assert_eq!(a.borrow().estimated_minutes, 10);
    assert_eq!(b1.borrow().estimated_minutes, 5);
    assert_eq!(b.borrow().estimated_minutes, 5);
    assert_eq!(task.borrow().estimated_minutes, 15);
    assert_eq!(total, 15);
}

#[test]
fn internal_value_is_derived_not_preserved() {
    // A node that declares both children and its own duration loses the
    // declared value: leaves are authoritative, internal nodes are sums.
    let parent = leaf("parent", 120);
    let child = leaf("child", 30);
    add_child(&NodeHandle::subtask(&parent), child);
    let total = update_estimated_minutes(&NodeHandle::subtask(&parent));
    assert_eq!(total, 30);
    assert_eq!(parent.borrow().estimated_minutes, 30);
}

#[test]
fn roll_up_saturates_instead_of_overflowing() {
    let task = Task::new("huge").unwrap();
    let root = NodeHandle::task(&task);
    add_child(&root, leaf("x", u32::MAX));
    add_child(&root, leaf("y", u32::MAX));
    assert_eq!(update_estimated_minutes(&root), u32::MAX);
    assert_eq!(task.borrow().estimated_minutes, u32::MAX);
}

#[test]
fn leaf_task_keeps_its_own_minutes() {
    let task = Task::new("solo").unwrap();
    task.borrow_mut().estimated_minutes = 45;
    assert_eq!(update_estimated_minutes(&NodeHandle::task(&task)), 45);
    assert_eq!(task.borrow().estimated_minutes, 45);
}

// ============================================================================
// Accessors and comments
// ============================================================================

#[test]
fn subtask_at_bounds_check() {
    let (task, _, _, _) = sample_tree();
    let root = NodeHandle::task(&task);
    assert_eq!(root.subtask_at(0).unwrap().borrow().name, "A");
    assert!(matches!(
        root.subtask_at(5),
        Err(PlannerError::IndexOutOfBounds { index: 5, len: 2 })
    ));
}

#[test]
fn replace_subtask_wires_newcomer() {
    let (task, _, _, _) = sample_tree();
    let root = NodeHandle::task(&task);
    let replacement = leaf("A2", 8);
    root.replace_subtask(0, replacement.clone()).unwrap();
    assert_eq!(task.borrow().subtasks[0].borrow().name, "A2");
    assert_eq!(
        replacement.borrow().supertask_kind,
        Some(SupertaskKind::Task)
    );
}

#[test]
fn clear_subtasks_resets_leaf_state() {
    let (_, _, b, _) = sample_tree();
    NodeHandle::subtask(&b).clear_subtasks();
    assert!(!b.borrow().has_subtasks);
    assert!(b.borrow().subtasks.is_empty());
}

#[test]
fn comment_operations_on_both_node_kinds() {
    let task = Task::new("annotated").unwrap();
    let subtask = Subtask::new("note me").unwrap();

    task.borrow_mut().add_comment("first".to_string());
    task.borrow_mut().set_comment(0, "revised".to_string()).unwrap();
    assert_eq!(task.borrow().comments, vec!["revised"]);
    assert_eq!(task.borrow_mut().remove_comment(0).unwrap(), "revised");

    subtask.borrow_mut().add_comment("only".to_string());
    assert!(matches!(
        subtask.borrow_mut().set_comment(3, "x".to_string()),
        Err(PlannerError::IndexOutOfBounds { index: 3, len: 1 })
    ));
}

#[test]
fn blank_names_are_rejected_at_construction() {
    assert!(matches!(Task::new("   "), Err(PlannerError::EmptyName)));
    assert!(matches!(Subtask::new(""), Err(PlannerError::EmptyName)));
}
