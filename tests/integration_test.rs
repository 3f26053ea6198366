use meetup_api::{Config, DecodeReason, Error, Meetup, Params, params};
use mockito::{Server, ServerGuard};
use serde_json::json;

fn client_for(server: &ServerGuard, stored: Params) -> Meetup {
    let config = Config {
        api_url: server.url(),
        authorize_url: format!("{}/oauth2/authorize", server.url()),
        access_url: format!("{}/oauth2/access", server.url()),
        ..Config::default()
    };
    Meetup::with_config(config, stored).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_paginated_walk_over_signed_listing() {
    let mut server = Server::new_async().await;

    let page1 = server
        .mock("GET", "/2/events?key=abc&sign=true")
        .with_status(200)
        .with_body(
            json!({
                "results": [1, 2],
                "meta": {"next": format!("{}/2/events?offset=1", server.url())}
            })
            .to_string(),
        )
        .create_async()
        .await;

    // stored parameters and the signing rule apply to cursor follow-ups too
    let page2 = server
        .mock("GET", "/2/events?offset=1&key=abc&sign=true")
        .with_status(200)
        .with_body(r#"{"results": [3], "meta": {"next": ""}}"#)
        .create_async()
        .await;

    let client = client_for(&server, params(&[("key", "abc")]));

    let mut results = Vec::new();
    let mut page = client.events(Params::new()).await.unwrap();
    results.extend(page["results"].as_array().unwrap().clone());
    while Meetup::has_next(&page) {
        page = client.get_next(&page).await.unwrap();
        results.extend(page["results"].as_array().unwrap().clone());
    }

    page1.assert_async().await;
    page2.assert_async().await;
    assert_eq!(results, vec![json!(1), json!(2), json!(3)]);
}

#[test_log::test(tokio::test)]
async fn test_oauth_code_flow() {
    let mut server = Server::new_async().await;
    let stored = params(&[("client_id", "cid"), ("client_secret", "sec")]);
    let client = client_for(&server, stored);

    // step 1: the URL the user is redirected to
    let authorize = client
        .authorize_url(params(&[("redirect_uri", "https://example.com/cb")]))
        .unwrap();
    assert!(authorize.starts_with(&format!("{}/oauth2/authorize?", server.url())));
    assert!(authorize.contains("response_type=code"));
    assert!(authorize.contains("client_id=cid"));

    // step 2: code exchange; client credentials merge into the form body
    let access = server
        .mock("POST", "/oauth2/access")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body("client_id=cid&client_secret=sec&code=x&grant_type=authorization_code")
        .with_status(200)
        .with_body(r#"{"access_token": "t", "refresh_token": "r", "expires_in": 3600}"#)
        .create_async()
        .await;

    let token = client.access(params(&[("code", "x")])).await.unwrap();
    access.assert_async().await;
    assert_eq!(token["access_token"], "t");

    // step 3: refresh with the returned refresh token
    let refresh = server
        .mock("POST", "/oauth2/access")
        .match_body("client_id=cid&client_secret=sec&grant_type=refresh_token&refresh_token=r")
        .with_status(200)
        .with_body(r#"{"access_token": "t2", "refresh_token": "r", "expires_in": 3600}"#)
        .create_async()
        .await;

    let renewed = client
        .refresh(params(&[(
            "refresh_token",
            token["refresh_token"].as_str().unwrap(),
        )]))
        .await
        .unwrap();
    refresh.assert_async().await;
    assert_eq!(renewed["access_token"], "t2");
}

#[test_log::test(tokio::test)]
async fn test_resource_error_classification() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/2/groups")
        .with_status(404)
        .with_body(r#"{"code": 404, "problem": "Not Found", "details": "no such id"}"#)
        .create_async()
        .await;

    let client = client_for(&server, Params::new());
    let err = client.groups(Params::new()).await.unwrap_err();

    mock.assert_async().await;
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "404 - Not Found - no such id");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[test_log::test(tokio::test)]
async fn test_unparsable_body_is_a_decode_error() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/2/photos")
        .with_status(200)
        .with_body("{bad json")
        .create_async()
        .await;

    let client = client_for(&server, Params::new());
    let err = client.photos(Params::new()).await.unwrap_err();

    mock.assert_async().await;
    match err {
        Error::Decode { reason, .. } => assert_eq!(reason, DecodeReason::Syntax),
        other => panic!("expected Decode error, got {:?}", other),
    }
}

#[test_log::test(tokio::test)]
async fn test_unresolved_template_never_reaches_the_network() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, params(&[("key", "abc")]));
    let err = client
        .discussion_boards(Params::new())
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        Error::MissingParameter { name, .. } => assert_eq!(name, "urlname"),
        other => panic!("expected MissingParameter, got {:?}", other),
    }
}
