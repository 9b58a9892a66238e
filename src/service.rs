use crate::models::PlaybackState;
use crate::spotify::SpotifyClient;
use crate::{error::Error, resp, CONFIG, LOG};

#[derive(Clone)]
pub struct Context {
    pub spotify: SpotifyClient,
}

pub async fn start() -> anyhow::Result<()> {
    let spotify = SpotifyClient::from_config(&CONFIG)?;
    let app = build_app(Context { spotify });
    slog::info!(LOG, "running at {}", CONFIG.host());
    app.listen(CONFIG.host()).await?;
    Ok(())
}

pub fn build_app(ctx: Context) -> tide::Server<Context> {
    let mut app = tide::with_state(ctx);
    app.at("/").get(now_playing);
    app.at("/status").get(status);
    app.at("/api/now-playing").get(now_playing);
    app.at("/api/status").get(status);
    app.with(crate::logging::LogMiddleware::new());
    app
}

async fn status(_req: tide::Request<Context>) -> tide::Result {
    Ok(resp!(json => serde_json::json!({
        "ok": "ok",
        "version": &CONFIG.version,
    })))
}

/// Exchange the refresh token for a fresh access token, then fetch the
/// playback state with it. Both hops run on every request, the access
/// token is never held across invocations.
async fn fetch_now_playing(spotify: &SpotifyClient) -> Result<PlaybackState, Error> {
    let access = spotify.refresh_access_token().await?;
    let state = spotify.currently_playing(&access.access_token).await?;
    // a 204 from spotify means nothing is playing; callers still get a
    // 200 with an empty playback state
    Ok(state.unwrap_or_default())
}

async fn now_playing(req: tide::Request<Context>) -> tide::Result {
    match fetch_now_playing(&req.state().spotify).await {
        Ok(state) => Ok(resp!(json => state)),
        Err(e) => {
            slog::error!(LOG, "error fetching now playing {}", e);
            Ok(resp!(status => 500, body => e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::Credentials;
    use httpmock::prelude::*;
    use tide::http::{Method, Request, Response, StatusCode, Url};

    fn test_app(base_url: &str) -> tide::Server<Context> {
        let spotify = SpotifyClient::new(
            Credentials {
                client_id: "client-id".to_string(),
                client_secret: "client-secret".to_string(),
                refresh_token: "refresh-token".to_string(),
            },
            base_url,
            base_url,
            std::time::Duration::from_secs(5),
        )
        .expect("client build error");
        build_app(Context { spotify })
    }

    fn get(path: &str) -> Request {
        Request::new(
            Method::Get,
            Url::parse(&format!("http://localhost{}", path)).expect("bad test url"),
        )
    }

    fn mock_token_endpoint(server: &MockServer) {
        server.mock(|when, then| {
            when.method(POST).path("/api/token");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"access_token":"abc","token_type":"Bearer","scope":"","expires_in":3600}"#);
        });
    }

    #[async_std::test]
    async fn now_playing_end_to_end() {
        let server = MockServer::start();
        mock_token_endpoint(&server);
        let playing = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/me/player/currently-playing")
                .header("authorization", "Bearer abc");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{
                        "is_playing": true,
                        "currently_playing_type": "track",
                        "item": {
                            "name": "Song",
                            "album": {"images": []},
                            "artists": [{"name": "Artist"}],
                            "external_urls": {"spotify": "https://open.spotify.com/track/xyz"}
                        }
                    }"#,
                );
        });

        let app = test_app(&server.base_url());
        let mut resp: Response = app.respond(get("/")).await.expect("respond error");
        playing.assert();
        assert_eq!(resp.status(), StatusCode::Ok);
        let state: PlaybackState = resp.body_json().await.expect("body json error");
        assert!(state.is_playing);
        assert_eq!(state.item.expect("missing track").name, "Song");
    }

    #[async_std::test]
    async fn now_playing_when_nothing_playing() {
        let server = MockServer::start();
        mock_token_endpoint(&server);
        server.mock(|when, then| {
            when.method(GET).path("/v1/me/player/currently-playing");
            then.status(204);
        });

        let app = test_app(&server.base_url());
        let mut resp: Response = app
            .respond(get("/api/now-playing"))
            .await
            .expect("respond error");
        assert_eq!(resp.status(), StatusCode::Ok);
        let state: PlaybackState = resp.body_json().await.expect("body json error");
        assert!(!state.is_playing);
        assert!(state.item.is_none());
    }

    #[async_std::test]
    async fn now_playing_with_unreachable_token_endpoint() {
        let app = test_app("http://127.0.0.1:1");
        let mut resp: Response = app.respond(get("/")).await.expect("respond error");
        assert_eq!(resp.status(), StatusCode::InternalServerError);
        let body = resp.body_string().await.expect("body error");
        assert!(!body.is_empty());
    }

    #[async_std::test]
    async fn now_playing_with_rejected_credentials() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/token");
            then.status(400)
                .header("content-type", "application/json")
                .body(r#"{"error":"invalid_grant"}"#);
        });

        let app = test_app(&server.base_url());
        let mut resp: Response = app.respond(get("/")).await.expect("respond error");
        assert_eq!(resp.status(), StatusCode::InternalServerError);
        assert_eq!(resp.content_type(), Some(tide::http::mime::PLAIN));
        let body = resp.body_string().await.expect("body error");
        assert!(body.contains("400"));
    }

    #[async_std::test]
    async fn status_reports_version() {
        let app = test_app("http://127.0.0.1:1");
        let mut resp: Response = app.respond(get("/status")).await.expect("respond error");
        assert_eq!(resp.status(), StatusCode::Ok);
        let body: serde_json::Value = resp.body_json().await.expect("body json error");
        assert_eq!(body["ok"], "ok");
    }
}
