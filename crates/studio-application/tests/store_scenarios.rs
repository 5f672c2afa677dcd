//! Store behavior seen from a client: seed data, auth token effects,
//! subscription and logout semantics, chatbot gating.

mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use common::{open_store, user};
use studio_application::{ChatbotService, LogMessageSender};
use studio_core::chatbot::{ChatbotFeature, ChatbotSettings, TemplateKey};
use studio_core::entity::{Room, UserRole};
use studio_core::seed;
use studio_core::settings::{PurchasedAddons, Settings, SettingsPatch};
use studio_core::state::{Action, CollectionUpdate, LANDING_TAB};
use studio_core::storage::{KeyValueStore, TOKEN_KEY};
use studio_infrastructure::MemoryKeyValueStore;

#[tokio::test]
async fn fresh_store_holds_seed_data() {
    let store = open_store(&MemoryKeyValueStore::new()).await;
    let state = store.state();

    assert!(!state.is_authenticated());
    assert_eq!(*state.students, seed::students());
    assert_eq!(*state.instructors, seed::instructors());
    assert_eq!(*state.rooms, seed::rooms());
    assert_eq!(*state.transactions, seed::transactions());
    assert_eq!(*state.agenda, seed::agenda());
    assert!(state.settings.is_dark_mode);
    assert_eq!(state.active_tab, LANDING_TAB);
}

#[tokio::test]
async fn login_overlays_settings_and_stores_token() {
    let kv = MemoryKeyValueStore::new();
    let store = open_store(&kv).await;
    store.dispatch(Action::ToggleTheme).await;

    let state = store
        .dispatch(Action::login(
            user("u1", UserRole::Admin),
            Some(SettingsPatch::app_name("Studio X")),
            "tok1",
        ))
        .await;

    assert!(state.is_authenticated());
    assert_eq!(state.session.user.as_ref().map(|u| u.id.as_str()), Some("u1"));
    assert_eq!(state.settings.app_name, "Studio X");
    assert!(!state.settings.is_dark_mode);
    assert_eq!(state.settings.modality, Settings::default().modality);
    assert_eq!(kv.get(TOKEN_KEY).await.unwrap().as_deref(), Some("tok1"));
}

#[tokio::test]
async fn subscription_update_without_user_changes_nothing() {
    let store = open_store(&MemoryKeyValueStore::new()).await;
    let before = store.state();
    assert!(before.settings.purchased_addons.is_none());

    let after = store
        .dispatch(Action::UpdateSubscription {
            plan_id: "plan_pro".to_string(),
            addons: PurchasedAddons {
                financial_module: Some(true),
                whatsapp_bot: None,
            },
        })
        .await;

    assert!(Arc::ptr_eq(&before, &after));
    assert!(after.settings.purchased_addons.is_none());
}

#[tokio::test]
async fn logout_restores_seed_but_keeps_settings() {
    let kv = MemoryKeyValueStore::new();
    let store = open_store(&kv).await;
    store
        .dispatch(Action::login(user("u1", UserRole::Admin), None, "tok1"))
        .await;
    store
        .dispatch(Action::replace_collection(CollectionUpdate::Rooms(vec![Room {
            id: "r9".to_string(),
            name: "Sala 9".to_string(),
            capacity: 2,
        }])))
        .await;
    store
        .dispatch(Action::replace_collection(CollectionUpdate::Students(Vec::new())))
        .await;
    let settings_before = store
        .dispatch(Action::update_settings(SettingsPatch::app_name("Custom")))
        .await
        .settings
        .clone();

    let state = store.dispatch(Action::Logout).await;

    assert!(!state.is_authenticated());
    assert!(state.session.user.is_none());
    assert_eq!(*state.rooms, seed::rooms());
    assert_eq!(*state.students, seed::students());
    assert!(Arc::ptr_eq(&state.settings, &settings_before));
    assert_eq!(state.settings.app_name, "Custom");
    assert!(kv.get(TOKEN_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn impersonation_round_trip_restores_admin() {
    let store = open_store(&MemoryKeyValueStore::new()).await;
    let admin = user("root", UserRole::SuperAdmin);
    store
        .dispatch(Action::login(admin.clone(), None, "tok-root"))
        .await;

    let state = store
        .dispatch(Action::Impersonate {
            user: user("studio-7", UserRole::Admin),
            settings: SettingsPatch::app_name("Studio 7"),
        })
        .await;
    assert!(state.is_impersonating());
    assert_eq!(state.settings.app_name, "Studio 7");

    let state = store.dispatch(Action::StopImpersonating).await;
    assert_eq!(state.session.user.as_ref(), Some(&admin));
    assert!(state.session.impersonating_from.is_none());
}

#[tokio::test]
async fn chatbot_disabled_globally_sends_nothing() {
    let store = open_store(&MemoryKeyValueStore::new()).await;

    let mut chatbot = ChatbotSettings {
        is_enabled: false,
        ..ChatbotSettings::default()
    };
    chatbot.set_feature(
        TemplateKey::WelcomeMessage,
        ChatbotFeature::enabled("Bem-vindo {aluno}!"),
    );
    let state = store
        .dispatch(Action::update_settings(SettingsPatch {
            chatbot_settings: Some(Some(chatbot)),
            ..SettingsPatch::default()
        }))
        .await;

    let service = ChatbotService::new(Arc::new(LogMessageSender));
    let student = &state.students[0];
    for key in [TemplateKey::WelcomeMessage, TemplateKey::ClassReminder] {
        let sent = service
            .send_message(student, key, &state.settings, &BTreeMap::new())
            .await
            .unwrap();
        assert!(sent.is_none());
    }
}

#[tokio::test]
async fn welcome_message_uses_first_class_or_fallback() {
    let mut chatbot = ChatbotSettings {
        is_enabled: true,
        ..ChatbotSettings::default()
    };
    chatbot.set_feature(
        TemplateKey::WelcomeMessage,
        ChatbotFeature::enabled("Olá {aluno}, primeira aula: {proxima_aula}"),
    );
    let settings = Settings {
        chatbot_settings: Some(chatbot),
        ..Settings::default()
    };
    let service = ChatbotService::new(Arc::new(LogMessageSender));
    let students = seed::students();

    let scheduled = service
        .send_message(&students[0], TemplateKey::WelcomeMessage, &settings, &BTreeMap::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(scheduled.body, "Olá Ana Souza, primeira aula: Seg 08:00 😊");

    let unscheduled = service
        .send_message(&students[2], TemplateKey::WelcomeMessage, &settings, &BTreeMap::new())
        .await
        .unwrap()
        .unwrap();
    assert!(unscheduled
        .body
        .contains("em breve (entraremos em contato para agendar)"));
}
