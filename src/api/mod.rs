pub mod channel;
pub mod data;

#[cfg(test)]
mod tests {
    use crate::build_rocket;
    use crate::config::AppConfig;
    use rocket::http::Status;
    use rocket::local::blocking::Client;
    use serde_json::Value;

    fn client() -> Client {
        let config = AppConfig {
            youtube_api_key: "test-key".to_string(),
            port: 8080,
        };
        Client::tracked(build_rocket(config)).expect("valid rocket instance")
    }

    #[test]
    fn index_reports_status_message() {
        let client = client();
        let response = client.get("/").dispatch();

        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().expect("json body");
        assert!(body["message"].is_string());
    }

    #[test]
    fn channel_id_without_name_is_bad_request() {
        let client = client();
        let response = client.get("/api/channel_id").dispatch();

        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().expect("json body");
        assert_eq!(body["error"], "Missing channel_name parameter");
    }

    #[test]
    fn data_without_parameters_is_bad_request() {
        let client = client();
        let response = client.get("/api/data").dispatch();

        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().expect("json body");
        assert_eq!(body["error"], "Missing channel_id or channel_name parameter");
    }
}
