//! Behaviour tests for the emergency alert endpoint.
//!
//! Scenarios drive `POST /api/user/emergency` through the real services,
//! in-memory directory, and JWT credentials, with a recording SMS gateway
//! standing in for Twilio.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use prescripto_backend::Trace;
use prescripto_backend::domain::ports::{
    DispatchReceipt, FixturePasswordHasher, NotificationSendError, NotificationSender,
    SmsMessage, TokenService, UserDirectory, UserRecord,
};
use prescripto_backend::domain::{
    AccountService, AdminCredentials, Authenticator, DisplayName, DoctorOnboardingService,
    EmailAddress, EmergencyAlertService, Password, PasswordHash, PhoneNumber, Principal, User,
    UserId,
};
use prescripto_backend::inbound::http::emergency::send_emergency_alert;
use prescripto_backend::inbound::http::state::{HttpState, HttpStatePorts};
use prescripto_backend::outbound::auth::JwtTokenService;
use prescripto_backend::outbound::memory::{InMemoryDoctorRegistry, InMemoryUserDirectory};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const SIGNING_SECRET: &[u8] = b"emergency-alert-bdd-signing-secret!!";

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<SmsMessage>>,
    reject: AtomicBool,
}

impl RecordingSender {
    fn sent(&self) -> Vec<SmsMessage> {
        self.sent.lock().expect("sender lock").clone()
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send_sms(
        &self,
        message: &SmsMessage,
    ) -> Result<DispatchReceipt, NotificationSendError> {
        let count = {
            let mut sent = self.sent.lock().expect("sender lock");
            sent.push(message.clone());
            sent.len()
        };
        if self.reject.load(Ordering::SeqCst) {
            return Err(NotificationSendError::rejected(
                "status 400: invalid 'To' phone number",
            ));
        }
        Ok(DispatchReceipt {
            message_id: Some(format!("SM{count:032}")),
            status: Some("queued".to_owned()),
        })
    }
}

struct EmergencyWorld {
    runner: actix_rt::SystemRunner,
    tokens: Arc<JwtTokenService>,
    directory: Arc<InMemoryUserDirectory>,
    sender: Arc<RecordingSender>,
    patient: RefCell<Option<UserId>>,
    credential: RefCell<Option<String>>,
    last_status: RefCell<Option<u16>>,
    last_body: RefCell<Option<Value>>,
}

impl EmergencyWorld {
    fn new() -> Self {
        Self {
            runner: actix_rt::System::new(),
            tokens: Arc::new(JwtTokenService::new(
                SIGNING_SECRET,
                chrono::Duration::hours(1),
                Arc::new(mockable::DefaultClock),
            )),
            directory: Arc::new(InMemoryUserDirectory::new()),
            sender: Arc::new(RecordingSender::default()),
            patient: RefCell::new(None),
            credential: RefCell::new(None),
            last_status: RefCell::new(None),
            last_body: RefCell::new(None),
        }
    }

    fn add_patient(&self, name: &str, caregiver: Option<&str>) {
        let id = UserId::random();
        let user = User::new(
            id,
            DisplayName::new(name).expect("display name"),
            EmailAddress::new(format!("{}@example.com", name.to_lowercase())).expect("email"),
            PhoneNumber::parse("+919876543210").expect("phone"),
            caregiver.map(|raw| PhoneNumber::parse(raw).expect("caregiver phone")),
        );
        let record = UserRecord {
            user,
            password_hash: PasswordHash::new("plain$correct horse"),
        };
        self.runner
            .block_on(self.directory.insert(record))
            .expect("insert patient");
        *self.patient.borrow_mut() = Some(id);
    }

    fn sign_in(&self) {
        let id = self.patient.borrow().expect("patient registered");
        let issued = self
            .tokens
            .issue(&Principal::Patient(id))
            .expect("issue token");
        *self.credential.borrow_mut() = Some(issued.token.expose().to_owned());
    }

    fn http_state(&self) -> web::Data<HttpState> {
        let tokens: Arc<dyn TokenService> = self.tokens.clone();
        let authenticator = Authenticator::new(tokens);
        let admin = AdminCredentials::new(
            EmailAddress::new("admin@prescripto.example").expect("admin email"),
            Password::for_login("qwerty123").expect("admin password"),
        );
        web::Data::new(HttpState::new(HttpStatePorts {
            emergency: Arc::new(EmergencyAlertService::new(
                authenticator.clone(),
                self.directory.clone(),
                self.sender.clone(),
            )),
            accounts: Arc::new(AccountService::new(
                authenticator.clone(),
                self.directory.clone(),
                Arc::new(FixturePasswordHasher),
            )),
            doctors: Arc::new(DoctorOnboardingService::new(
                authenticator,
                Arc::new(InMemoryDoctorRegistry::new()),
                Arc::new(FixturePasswordHasher),
                admin,
            )),
        }))
    }

    fn press_emergency_button(&self) {
        let state = self.http_state();
        let credential = self.credential.borrow().clone();
        let (status, body) = self.runner.block_on(async move {
            let app = actix_test::init_service(
                App::new()
                    .app_data(state)
                    .wrap(Trace)
                    .service(web::scope("/api/user").service(send_emergency_alert)),
            )
            .await;
            let mut request = actix_test::TestRequest::post()
                .uri("/api/user/emergency")
                .set_json(json!({}));
            if let Some(token) = credential {
                request = request.insert_header((AUTHORIZATION, format!("Bearer {token}")));
            }
            let response = actix_test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let body: Value = actix_test::read_body_json(response).await;
            (status, body)
        });
        *self.last_status.borrow_mut() = Some(status);
        *self.last_body.borrow_mut() = Some(body);
    }

    fn last_message(&self) -> SmsMessage {
        self.sender
            .sent()
            .last()
            .cloned()
            .expect("at least one message sent")
    }
}

#[fixture]
fn world() -> EmergencyWorld {
    EmergencyWorld::new()
}

#[given("a patient \"{name}\" with caregiver number \"{phone}\"")]
fn a_patient_with_caregiver_number(world: &EmergencyWorld, name: String, phone: String) {
    world.add_patient(&name, Some(&phone));
}

#[given("a patient \"{name}\" without a caregiver number")]
fn a_patient_without_a_caregiver_number(world: &EmergencyWorld, name: String) {
    world.add_patient(&name, None);
}

#[given("the patient is signed in")]
fn the_patient_is_signed_in(world: &EmergencyWorld) {
    world.sign_in();
}

#[given("the patient presents the credential \"{token}\"")]
fn the_patient_presents_the_credential(world: &EmergencyWorld, token: String) {
    *world.credential.borrow_mut() = Some(token);
}

#[given("the SMS gateway rejects messages")]
fn the_sms_gateway_rejects_messages(world: &EmergencyWorld) {
    world.sender.reject.store(true, Ordering::SeqCst);
}

#[when("the patient presses the emergency button")]
fn the_patient_presses_the_emergency_button(world: &EmergencyWorld) {
    world.press_emergency_button();
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &EmergencyWorld, status: u16) {
    assert_eq!(*world.last_status.borrow(), Some(status));
    let body = world.last_body.borrow();
    let success = body
        .as_ref()
        .and_then(|value| value.get("success"))
        .and_then(Value::as_bool);
    assert_eq!(success, Some(status == 200));
}

#[then("the response message is \"{message}\"")]
fn the_response_message_is(world: &EmergencyWorld, message: String) {
    let body = world.last_body.borrow();
    let actual = body
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(Value::as_str);
    assert_eq!(actual, Some(message.as_str()));
}

#[then("the gateway received {count} message")]
fn the_gateway_received_one_message(world: &EmergencyWorld, count: usize) {
    assert_eq!(world.sender.sent().len(), count);
}

#[then("the gateway received {count} messages")]
fn the_gateway_received_messages(world: &EmergencyWorld, count: usize) {
    assert_eq!(world.sender.sent().len(), count);
}

#[then("the last message was sent to \"{phone}\"")]
fn the_last_message_was_sent_to(world: &EmergencyWorld, phone: String) {
    assert_eq!(world.last_message().to.as_ref(), phone);
}

#[then("the last message mentions \"{name}\"")]
fn the_last_message_mentions(world: &EmergencyWorld, name: String) {
    assert!(world.last_message().body.contains(&name));
}

#[scenario(
    path = "tests/features/emergency_alert.feature",
    name = "Alert reaches the caregiver"
)]
fn alert_reaches_the_caregiver(world: EmergencyWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/emergency_alert.feature",
    name = "Missing caregiver number sends nothing"
)]
fn missing_caregiver_number_sends_nothing(world: EmergencyWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/emergency_alert.feature",
    name = "Missing credential sends nothing"
)]
fn missing_credential_sends_nothing(world: EmergencyWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/emergency_alert.feature",
    name = "Forged credential sends nothing"
)]
fn forged_credential_sends_nothing(world: EmergencyWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/emergency_alert.feature",
    name = "Gateway failure is reported without retry"
)]
fn gateway_failure_is_reported_without_retry(world: EmergencyWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/emergency_alert.feature",
    name = "Repeated presses send repeated alerts"
)]
fn repeated_presses_send_repeated_alerts(world: EmergencyWorld) {
    drop(world);
}
