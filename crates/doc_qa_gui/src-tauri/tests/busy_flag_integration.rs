//! Busy-flag visibility through the commands while an upload is in flight.
//! Separate test binary: the session is process-global.

use std::time::Duration;

use doc_qa_client::ActionState;
use doc_qa_gui_lib::commands::{
    do_configure, do_reset, do_select_file, do_session_view, do_upload, ConfigForm,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn upload_flag_is_in_flight_until_response_arrives() {
    // Unconfigured until a form is applied, then usable.
    do_reset();
    assert!(do_upload().await.is_err());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"doc_id": "slow"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let form = ConfigForm {
        backend_url: server.uri(),
        download_dir: dir.path().display().to_string(),
        ..ConfigForm::default()
    };
    do_configure(&form).expect("configure ok");
    do_select_file("doc.txt".into(), b"body".to_vec()).unwrap();

    let upload = tokio::spawn(do_upload());
    tokio::time::sleep(Duration::from_millis(150)).await;

    let view = do_session_view().unwrap();
    assert_eq!(view.uploading, ActionState::InFlight);
    assert_eq!(view.asking, ActionState::Idle);
    assert_eq!(view.document_id, "");

    let notice = upload.await.unwrap().expect("upload ok");
    assert!(notice.contains("slow"));
    let view = do_session_view().unwrap();
    assert_eq!(view.uploading, ActionState::Idle);
    assert_eq!(view.document_id, "slow");

    do_reset();
}
