use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web::Data, App};
use taskboard::db::db::Db;
use taskboard::db::tasks::Tasks;
use taskboard::libs::config::Config;
use taskboard::libs::task::{SortOrder, TaskFilter};
use tempfile::TempDir;

fn scratch_config() -> (TempDir, Config) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config {
        db_path: temp_dir.path().join("board.db"),
        listen: "127.0.0.1:0".to_string(),
    };
    Db::init(&config).unwrap();
    (temp_dir, config)
}

macro_rules! board_app {
    ($config:expr) => {
        test::init_service(App::new().app_data(Data::new($config.clone())).configure(taskboard::web::routes)).await
    };
}

fn location(resp: &ServiceResponse<impl MessageBody>) -> &str {
    resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()).unwrap_or_default()
}

#[actix_web::test]
async fn add_creates_task_and_redirects_to_board() {
    let (_tmp, config) = scratch_config();
    let app = board_app!(config);

    let req = test::TestRequest::post()
        .uri("/add")
        .set_form([("title", "Buy milk"), ("due_date", "2024-01-10")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let tasks = Tasks::new(&config).unwrap();
    let open = tasks.fetch(TaskFilter::Completed(false), SortOrder::Unsorted).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].title, "Buy milk");
    assert!(!open[0].completed);
}

#[actix_web::test]
async fn add_with_blank_title_creates_nothing() {
    let (_tmp, config) = scratch_config();
    let app = board_app!(config);

    let req = test::TestRequest::post().uri("/add").set_form([("title", "   "), ("due_date", "")]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let tasks = Tasks::new(&config).unwrap();
    assert!(tasks.fetch(TaskFilter::All, SortOrder::Unsorted).unwrap().is_empty());
}

#[actix_web::test]
async fn board_renders_both_lists() {
    let (_tmp, config) = scratch_config();
    {
        let tasks = Tasks::new(&config).unwrap();
        tasks.insert("Open item", None).unwrap();
        let done = tasks.insert("Done item", None).unwrap();
        tasks.toggle_completed(done.id).unwrap();
    }
    let app = board_app!(config);

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let page = String::from_utf8(body.to_vec()).unwrap();

    assert!(page.contains("Open item"));
    assert!(page.contains("Done item"));
    assert!(page.contains("<h2>Open</h2>"));
    assert!(page.contains("<h2>Completed</h2>"));
}

#[actix_web::test]
async fn board_escapes_user_titles() {
    let (_tmp, config) = scratch_config();
    {
        let tasks = Tasks::new(&config).unwrap();
        tasks.insert("<script>alert(1)</script>", None).unwrap();
    }
    let app = board_app!(config);

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let page = String::from_utf8(body.to_vec()).unwrap();

    assert!(!page.contains("<script>alert(1)</script>"));
    assert!(page.contains("&lt;script&gt;"));
}

#[actix_web::test]
async fn board_accepts_sort_keys() {
    let (_tmp, config) = scratch_config();
    {
        let tasks = Tasks::new(&config).unwrap();
        tasks.insert("Someday", None).unwrap();
        tasks.insert("Tomorrow", Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())).unwrap();
    }
    let app = board_app!(config);

    let req = test::TestRequest::get().uri("/?sort=due_near").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let page = String::from_utf8(body.to_vec()).unwrap();

    // The undated task renders after the dated one
    let dated = page.find("Tomorrow").unwrap();
    let undated = page.find("Someday").unwrap();
    assert!(dated < undated);
}

#[actix_web::test]
async fn toggle_flips_completion_and_redirects() {
    let (_tmp, config) = scratch_config();
    let id = {
        let tasks = Tasks::new(&config).unwrap();
        tasks.insert("File taxes", None).unwrap().id
    };
    let app = board_app!(config);

    let req = test::TestRequest::post().uri(&format!("/complete/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let tasks = Tasks::new(&config).unwrap();
    assert!(tasks.get_by_id(id).unwrap().unwrap().completed);
}

#[actix_web::test]
async fn toggle_of_missing_id_still_redirects() {
    let (_tmp, config) = scratch_config();
    let app = board_app!(config);

    let req = test::TestRequest::post().uri("/complete/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn delete_removes_task_and_redirects() {
    let (_tmp, config) = scratch_config();
    let id = {
        let tasks = Tasks::new(&config).unwrap();
        tasks.insert("Short-lived", None).unwrap().id
    };
    let app = board_app!(config);

    let req = test::TestRequest::post().uri(&format!("/delete/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let tasks = Tasks::new(&config).unwrap();
    assert!(tasks.get_by_id(id).unwrap().is_none());
}

#[actix_web::test]
async fn delete_of_missing_id_still_redirects() {
    let (_tmp, config) = scratch_config();
    let app = board_app!(config);

    let req = test::TestRequest::post().uri("/delete/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn edit_preloads_the_task_into_the_form() {
    let (_tmp, config) = scratch_config();
    let id = {
        let tasks = Tasks::new(&config).unwrap();
        tasks.insert("Editable", Some(chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())).unwrap().id
    };
    let app = board_app!(config);

    let req = test::TestRequest::get().uri(&format!("/edit/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains(&format!("action=\"/update/{}\"", id)));
    assert!(page.contains("value=\"Editable\""));
    assert!(page.contains("value=\"2024-06-01\""));
}

#[actix_web::test]
async fn edit_of_missing_id_renders_plain_board() {
    let (_tmp, config) = scratch_config();
    let app = board_app!(config);

    let req = test::TestRequest::get().uri("/edit/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(!page.contains("action=\"/update/"));
}

#[actix_web::test]
async fn update_rewrites_title_and_due_date() {
    let (_tmp, config) = scratch_config();
    let id = {
        let tasks = Tasks::new(&config).unwrap();
        tasks.insert("Original", None).unwrap().id
    };
    let app = board_app!(config);

    let req = test::TestRequest::post()
        .uri(&format!("/update/{}", id))
        .set_form([("title", "Renamed"), ("due_date", "2024-02-02")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let tasks = Tasks::new(&config).unwrap();
    let task = tasks.get_by_id(id).unwrap().unwrap();
    assert_eq!(task.title, "Renamed");
    assert_eq!(task.due_date, chrono::NaiveDate::from_ymd_opt(2024, 2, 2));
}

#[actix_web::test]
async fn update_with_blank_title_bounces_back_to_edit() {
    let (_tmp, config) = scratch_config();
    let id = {
        let tasks = Tasks::new(&config).unwrap();
        tasks.insert("Original", None).unwrap().id
    };
    let app = board_app!(config);

    let req = test::TestRequest::post().uri(&format!("/update/{}", id)).set_form([("title", " "), ("due_date", "")]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/edit/{}", id));

    let tasks = Tasks::new(&config).unwrap();
    assert_eq!(tasks.get_by_id(id).unwrap().unwrap().title, "Original");
}
