//! End-to-end login and scraping against a mock upstream serving saved pages

use mockito::{Matcher, Server, ServerGuard};
use vibrance_http_client::{
    Credentials, EventRecord, MerchandiseRecord, ProfileDocument, ProfileRecord, Url,
    VibranceClient, VibranceError, extract_events, extract_merchandise, extract_profile,
};

const LOGIN_ERROR: &str = include_str!("fixtures/login_error.html");
const LOGIN_SUCCESS: &str = include_str!("fixtures/login_success.html");
const PROFILE: &str = include_str!("fixtures/profile.html");

fn live_document() -> ProfileDocument {
    ProfileDocument::parse(
        PROFILE,
        Url::parse("http://vitchennaievents.com/vibrance/profile/").unwrap(),
    )
}

fn client_for(server: &ServerGuard) -> VibranceClient {
    VibranceClient::builder()
        .base_url(format!("{}/vibrance", server.url()))
        .unwrap()
        .build()
        .unwrap()
}

/// Mock a successful login for `username` that hands out `sessionid=<username>`
async fn mock_login(server: &mut ServerGuard, username: &str) -> mockito::Mock {
    server
        .mock("POST", "/vibrance/login/")
        .match_body(Matcher::UrlEncoded(
            "username-login".into(),
            username.into(),
        ))
        .with_status(200)
        .with_header("set-cookie", &format!("sessionid={}; Path=/", username))
        .with_body(LOGIN_SUCCESS)
        .create_async()
        .await
}

#[test]
fn test_profile_fixture() {
    let profile = extract_profile(&live_document()).unwrap();
    assert_eq!(
        profile,
        ProfileRecord {
            id: Some("VIB-2024-0042".to_string()),
            name: Some("Asha Raman".to_string()),
            email: Some("asha.raman@example.com".to_string()),
            mobile: Some("9876543210".to_string()),
            college: Some("VIT Chennai".to_string()),
        }
    );
}

#[test]
fn test_events_fixture() {
    let events = extract_events(&live_document()).unwrap();
    assert_eq!(
        events,
        vec![
            EventRecord {
                order_id: Some(1042),
                title: "Hackathon".to_string(),
                location: "Main Auditorium".to_string(),
                date: "01-03-2024".to_string(),
                time: "10:00 AM".to_string(),
                is_paid: true,
            },
            EventRecord {
                order_id: Some(1077),
                title: "Battle of Bands".to_string(),
                location: "Open Air Theatre".to_string(),
                date: "02-03-2024".to_string(),
                time: "06:30 PM".to_string(),
                // "Unpaid" contains "paid"
                is_paid: true,
            },
        ]
    );
}

#[test]
fn test_merchandise_fixture() {
    let items = extract_merchandise(&live_document()).unwrap();
    assert_eq!(
        items,
        vec![
            MerchandiseRecord {
                name: Some("Vibrance T-Shirt".to_string()),
                image: Some("http://vitchennaievents.com/vibrance/profile/img/shirt.png".to_string()),
                size: Some("L".to_string()),
                quantity: 2.0,
                status: Some("Delivered".to_string()),
            },
            MerchandiseRecord {
                name: Some("Vibrance Cap".to_string()),
                image: Some("http://vitchennaievents.com/vibrance/static/cap.png".to_string()),
                size: Some("Free Size".to_string()),
                quantity: 0.0,
                status: Some("Pending".to_string()),
            },
        ]
    );
}

#[tokio::test]
async fn test_get_user_end_to_end() {
    let mut server = Server::new_async().await;
    let login = mock_login(&mut server, "asha").await;
    let profile = server
        .mock("GET", "/vibrance/profile/")
        .match_header("cookie", "sessionid=asha")
        .with_status(200)
        .with_body(PROFILE)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let user = client
        .get_user(&Credentials::new("asha", "secret"))
        .await
        .unwrap();

    assert_eq!(user.name.as_deref(), Some("Asha Raman"));
    login.assert_async().await;
    profile.assert_async().await;
}

#[tokio::test]
async fn test_merchandise_images_resolve_under_served_origin() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server, "asha").await;
    let _profile = server
        .mock("GET", "/vibrance/profile/")
        .with_status(200)
        .with_body(PROFILE)
        .create_async()
        .await;

    let client = client_for(&server);
    let items = client
        .get_merchandise(&Credentials::new("asha", "secret"))
        .await
        .unwrap();

    let origin = Url::parse(&server.url()).unwrap();
    let image = Url::parse(items[0].image.as_deref().unwrap()).unwrap();
    assert_eq!(image.origin(), origin.origin());
    assert_eq!(image.path(), "/vibrance/profile/img/shirt.png");
}

#[tokio::test]
async fn test_each_call_logs_in_again() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/vibrance/login/")
        .with_status(200)
        .with_header("set-cookie", "sessionid=asha; Path=/")
        .with_body(LOGIN_SUCCESS)
        .expect(3)
        .create_async()
        .await;
    let profile = server
        .mock("GET", "/vibrance/profile/")
        .with_status(200)
        .with_body(PROFILE)
        .expect(3)
        .create_async()
        .await;

    let client = client_for(&server);
    let credentials = Credentials::new("asha", "secret");
    client.get_user(&credentials).await.unwrap();
    client.get_events(&credentials).await.unwrap();
    client.get_merchandise(&credentials).await.unwrap();

    login.assert_async().await;
    profile.assert_async().await;
}

#[tokio::test]
async fn test_invalid_credentials_fixture() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/vibrance/login/")
        .with_status(200)
        .with_body(LOGIN_ERROR)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .acquire_session(&Credentials::new("asha", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(&err, VibranceError::InvalidCredentials(m) if m == "Incorrect password"));
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.public_message(), "Incorrect password");
}

#[tokio::test]
async fn test_concurrent_sessions_do_not_share_cookies() {
    let mut server = Server::new_async().await;
    let _asha_login = mock_login(&mut server, "asha").await;
    let _ravi_login = mock_login(&mut server, "ravi").await;

    let ravi_page = PROFILE.replace("Asha Raman", "Ravi Kumar");
    let asha_profile = server
        .mock("GET", "/vibrance/profile/")
        .match_header("cookie", "sessionid=asha")
        .with_status(200)
        .with_body(PROFILE)
        .expect(1)
        .create_async()
        .await;
    let ravi_profile = server
        .mock("GET", "/vibrance/profile/")
        .match_header("cookie", "sessionid=ravi")
        .with_status(200)
        .with_body(ravi_page)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let asha = Credentials::new("asha", "secret");
    let ravi = Credentials::new("ravi", "secret");
    let (asha_user, ravi_user) = tokio::join!(client.get_user(&asha), client.get_user(&ravi));

    assert_eq!(asha_user.unwrap().name.as_deref(), Some("Asha Raman"));
    assert_eq!(ravi_user.unwrap().name.as_deref(), Some("Ravi Kumar"));
    asha_profile.assert_async().await;
    ravi_profile.assert_async().await;
}

#[tokio::test]
async fn test_session_steps_share_one_page() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server, "asha").await;
    let profile = server
        .mock("GET", "/vibrance/profile/")
        .with_status(200)
        .with_body(PROFILE)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let session = client
        .acquire_session(&Credentials::new("asha", "secret"))
        .await
        .unwrap();
    assert_eq!(session.cookies().unwrap().to_str().unwrap(), "sessionid=asha");

    let document = session.fetch_profile_document().await.unwrap();
    assert_eq!(extract_events(&document).unwrap().len(), 2);
    assert_eq!(extract_merchandise(&document).unwrap().len(), 2);
    profile.assert_async().await;
}
