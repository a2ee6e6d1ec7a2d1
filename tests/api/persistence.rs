use claim::{assert_matches, assert_ok};
use innovatehive::domain::{ContactMessage, ContactName, EmailAddress, NewContact, NewSubscriber};
use innovatehive::persistence::InsertSubscriberError;

use crate::helpers::TestApp;

fn new_subscriber(email: &str) -> NewSubscriber {
    NewSubscriber {
        email: EmailAddress::parse(Some(email)).unwrap(),
    }
}

#[tokio::test]
async fn schema_initialization_is_idempotent() {
    let app = TestApp::spawn().await;
    let store = app.store();
    store.insert_subscriber(&new_subscriber("kept@example.com")).await.unwrap();

    assert_ok!(store.init_schema().await);

    assert_eq!(store.list_active_subscribers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn a_duplicate_subscriber_is_an_explicit_outcome() {
    let app = TestApp::spawn().await;
    let store = app.store();
    let first_id = store
        .insert_subscriber(&new_subscriber("dup@example.com"))
        .await
        .unwrap();
    let before = store.list_active_subscribers().await.unwrap();

    let second = store.insert_subscriber(&new_subscriber("dup@example.com")).await;

    assert_matches!(second, Err(InsertSubscriberError::Duplicate));
    let after = store.list_active_subscribers().await.unwrap();
    assert_eq!(before, after);
    assert_eq!(after[0].id, first_id);
}

#[tokio::test]
async fn concurrent_duplicates_leave_exactly_one_row() {
    let app = TestApp::spawn().await;
    let store = app.store();

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .insert_subscriber(&new_subscriber("race@example.com"))
                    .await
            })
        })
        .collect();
    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert_matches!(e, InsertSubscriberError::Duplicate),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.list_active_subscribers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn contacts_keep_insertion_order_newest_first() {
    let app = TestApp::spawn().await;
    let store = app.store();
    let contact = |name: &str| NewContact {
        name: ContactName::parse(Some(name)).unwrap(),
        email: EmailAddress::parse(Some("someone@example.com")).unwrap(),
        message: ContactMessage::parse(Some("A message that is long enough")).unwrap(),
    };

    let a = store.insert_contact(&contact("Alice")).await.unwrap();
    let b = store.insert_contact(&contact("Bruno")).await.unwrap();

    let contacts = store.list_contacts().await.unwrap();
    assert!(b > a);
    assert_eq!(
        contacts.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![b, a]
    );
    assert!(contacts[0].created_at >= contacts[1].created_at);
}
