#![forbid(unsafe_code)]

//! End-to-end scenarios with a small client model.
//!
//! Validates:
//! - Value-style changes (snapshot a field, restore it on undo)
//! - Command-style changes (the snapshot is the inverse action)
//! - Empty-side undo/redo are silent no-ops
//! - Multi-field edits grouped into one undo step

use std::sync::{Arc, Mutex};

use changekit::{Action, Change, ChangeStack, StackError};

const LIMIT: usize = 5;

// ============================================================================
// Client model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Person {
    name: String,
    age: u32,
}

impl Person {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            age: 0,
        }
    }
}

#[derive(Debug, Default)]
struct Team {
    people: Vec<Person>,
}

impl Team {
    fn add(&mut self, person: Person) {
        self.people.push(person);
    }

    fn remove(&mut self, person: &Person) {
        if let Some(pos) = self.people.iter().position(|p| p == person) {
            self.people.remove(pos);
        }
    }
}

fn rename(person: &Arc<Mutex<Person>>, name: &str) -> Change<String> {
    let old = person.lock().unwrap().name.clone();
    let (forward, back) = (person.clone(), person.clone());
    let name = name.to_string();
    Change::new(
        old,
        move || forward.lock().unwrap().name = name.clone(),
        move |old: &String| back.lock().unwrap().name = old.clone(),
    )
    .with_description("Rename person")
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn rename_undo_redo() {
    let person = Arc::new(Mutex::new(Person::new("")));
    let mut changes = ChangeStack::new(LIMIT);

    changes.add(rename(&person, "Jane"));
    assert_eq!(person.lock().unwrap().name, "Jane");
    assert_eq!(changes.next_undo_description(), Some("Rename person"));

    changes.undo();
    assert_eq!(person.lock().unwrap().name, "");
    assert!(changes.can_redo());

    changes.redo();
    assert_eq!(person.lock().unwrap().name, "Jane");
    assert!(!changes.can_redo());
}

#[test]
fn team_membership_as_commands() {
    let team = Arc::new(Mutex::new(Team::default()));
    let person = Person::new("Jane");
    let mut changes: ChangeStack<Action> = ChangeStack::new(LIMIT);

    let (adder, remover) = (team.clone(), team.clone());
    let (joining, leaving) = (person.clone(), person);
    changes.add(Change::command(
        move || adder.lock().unwrap().add(joining.clone()),
        move || remover.lock().unwrap().remove(&leaving),
    ));
    assert_eq!(team.lock().unwrap().people.len(), 1);

    changes.undo();
    assert!(team.lock().unwrap().people.is_empty());

    changes.redo();
    assert_eq!(team.lock().unwrap().people.len(), 1);
}

#[test]
fn empty_sides_are_silent() {
    let person = Arc::new(Mutex::new(Person::new("John")));
    let mut changes: ChangeStack<String> = ChangeStack::new(LIMIT);

    assert!(!changes.undo());
    assert!(!changes.redo());
    assert_eq!(person.lock().unwrap().name, "John");

    changes.add(rename(&person, "Jane"));
    changes.undo();
    assert!(!changes.undo());
    assert_eq!(changes.try_undo(), Err(StackError::NothingToUndo));
    assert_eq!(person.lock().unwrap().name, "John");
}

#[test]
fn profile_edit_is_one_step() {
    let person = Arc::new(Mutex::new(Person::new("John")));
    let mut changes: ChangeStack<Person> = ChangeStack::new(LIMIT);

    // Both members snapshot the whole person before the edit.
    let before = person.lock().unwrap().clone();
    let field = |apply: fn(&mut Person)| {
        let (forward, back) = (person.clone(), person.clone());
        Change::new(
            before.clone(),
            move || apply(&mut forward.lock().unwrap()),
            move |old: &Person| *back.lock().unwrap() = old.clone(),
        )
    };
    changes.add_group(vec![
        field(|p| p.name = "Jane".to_string()),
        field(|p| p.age = 30),
    ]);
    assert_eq!(person.lock().unwrap().age, 30);
    assert_eq!(changes.undo_depth(), 1);

    changes.undo();
    assert_eq!(*person.lock().unwrap(), before);

    changes.redo();
    assert_eq!(person.lock().unwrap().name, "Jane");
    assert_eq!(person.lock().unwrap().age, 30);
}

#[test]
fn old_renames_fall_off_the_end() {
    let person = Arc::new(Mutex::new(Person::new("p0")));
    let mut changes = ChangeStack::new(LIMIT);

    for n in 1..=10 {
        changes.add(rename(&person, &format!("p{n}")));
    }
    assert_eq!(changes.undo_depth(), LIMIT + 1);

    while changes.undo() {}
    // The oldest reachable snapshot is the one taken before rename #5.
    assert_eq!(person.lock().unwrap().name, "p4");
}
