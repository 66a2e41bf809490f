#![allow(dead_code)]

use std::{net::TcpListener, sync::Arc, time::Duration};

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use placement_portal::{
    entities::{
        application::{ApplicationStatus, JobApplication},
        event::{Event, EventChanges, EventInsert},
        forum_post::{ForumPost, ForumPostInsert, ForumPostRow, ForumPostWithAuthor},
        job::{Job, JobChanges, JobInsert},
        notification::{Notification, NotificationInsert},
        placement::{Placement, PlacementInsert},
        ppt::{Ppt, PptInsert},
        profile::{ProfileChanges, StudentProfile},
        user::{User, UserInsert},
    },
    errors::AppError,
    middlewares::auth::AuthMiddleware,
    repositories::{
        application::ApplicationRepository, event::EventRepository, forum::ForumRepository,
        job::JobRepository, notification::NotificationRepository, placement::PlacementRepository,
        ppt::PptRepository, profile::ProfileRepository, user::UserRepository,
    },
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    shared_repos::SharedRepositories,
    AppState,
};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<StudentProfile>,
    jobs: Vec<Job>,
    applications: Vec<JobApplication>,
    posts: Vec<ForumPost>,
    ppts: Vec<Ppt>,
    events: Vec<Event>,
    placements: Vec<Placement>,
    notifications: Vec<Notification>,
}

/// Every repository backed by one set of in-memory tables. Rows are kept in
/// insertion order and listed newest first, like the SQL repositories.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn repositories(&self) -> SharedRepositories {
        SharedRepositories {
            user_repo: Arc::new(self.clone()),
            profile_repo: Arc::new(self.clone()),
            job_repo: Arc::new(self.clone()),
            application_repo: Arc::new(self.clone()),
            forum_repo: Arc::new(self.clone()),
            ppt_repo: Arc::new(self.clone()),
            event_repo: Arc::new(self.clone()),
            placement_repo: Arc::new(self.clone()),
            notification_repo: Arc::new(self.clone()),
        }
    }

    pub fn application_count(&self, job_id: &Uuid) -> usize {
        self.tables.lock().applications.iter().filter(|a| a.job_id == *job_id).count()
    }
}

fn newest_first<T: Clone>(rows: &[T]) -> Vec<T> {
    rows.iter().rev().cloned().collect()
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        Ok(self.tables.lock().users.iter().find(|u| u.id == *id).cloned())
    }

    async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError> {
        let mut tables = self.tables.lock();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User with this email already exists".into()));
        }
        let id = Uuid::new_v4();
        tables.users.push(User {
            id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: Utc::now(),
        });
        Ok(id)
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn get_profile(&self, user_id: &Uuid) -> Result<Option<StudentProfile>, AppError> {
        Ok(self.tables.lock().profiles.iter().find(|p| p.user_id == *user_id).cloned())
    }

    async fn upsert_profile(&self, user_id: &Uuid, changes: &ProfileChanges) -> Result<StudentProfile, AppError> {
        let mut tables = self.tables.lock();

        if let Some(roll) = changes.roll_number.as_ref().into_option().flatten() {
            let taken = tables
                .profiles
                .iter()
                .any(|p| p.user_id != *user_id && p.roll_number.as_deref() == Some(roll.as_str()));
            if taken {
                return Err(AppError::Conflict("Roll number already in use".into()));
            }
        }

        let index = match tables.profiles.iter().position(|p| p.user_id == *user_id) {
            Some(index) => index,
            None => {
                tables.profiles.push(StudentProfile {
                    id: Uuid::new_v4(),
                    user_id: *user_id,
                    roll_number: None,
                    cgpa: None,
                    branch: None,
                    course: None,
                    phone: None,
                    resume_url: None,
                    updated_at: Utc::now(),
                });
                tables.profiles.len() - 1
            }
        };

        let profile = &mut tables.profiles[index];
        let changes = changes.clone();
        changes.roll_number.apply_to(&mut profile.roll_number);
        changes.cgpa.apply_to(&mut profile.cgpa);
        changes.branch.apply_to(&mut profile.branch);
        changes.course.apply_to(&mut profile.course);
        changes.phone.apply_to(&mut profile.phone);
        changes.resume_url.apply_to(&mut profile.resume_url);
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn list_jobs(&self) -> Result<Vec<Job>, AppError> {
        Ok(newest_first(&self.tables.lock().jobs))
    }

    async fn get_job(&self, id: &Uuid) -> Result<Option<Job>, AppError> {
        Ok(self.tables.lock().jobs.iter().find(|j| j.id == *id).cloned())
    }

    async fn create_job(&self, job: &JobInsert) -> Result<Job, AppError> {
        let job = Job {
            id: Uuid::new_v4(),
            company_name: job.company_name.clone(),
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            package: job.package.clone(),
            min_cgpa: job.min_cgpa,
            allowed_branches: job.allowed_branches.clone(),
            allowed_courses: job.allowed_courses.clone(),
            deadline: job.deadline,
            posted_by: job.posted_by,
            posted_at: Utc::now(),
        };
        self.tables.lock().jobs.push(job.clone());
        Ok(job)
    }

    async fn update_job(&self, id: &Uuid, changes: &JobChanges) -> Result<Option<Job>, AppError> {
        let mut tables = self.tables.lock();
        Ok(tables.jobs.iter_mut().find(|j| j.id == *id).map(|job| {
            changes.clone().apply_to(job);
            job.clone()
        }))
    }

    async fn delete_job(&self, id: &Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock();
        let before = tables.jobs.len();
        tables.jobs.retain(|j| j.id != *id);
        let removed = tables.jobs.len() != before;
        if removed {
            tables.applications.retain(|a| a.job_id != *id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn insert_if_absent(&self, job_id: &Uuid, student_id: &Uuid) -> Result<Option<JobApplication>, AppError> {
        let mut tables = self.tables.lock();
        if tables.applications.iter().any(|a| a.job_id == *job_id && a.student_id == *student_id) {
            return Ok(None);
        }
        let application = JobApplication {
            id: Uuid::new_v4(),
            job_id: *job_id,
            student_id: *student_id,
            applied_at: Utc::now(),
            status: ApplicationStatus::Pending,
        };
        tables.applications.push(application.clone());
        Ok(Some(application))
    }

    async fn list_by_student(&self, student_id: &Uuid) -> Result<Vec<JobApplication>, AppError> {
        let tables = self.tables.lock();
        Ok(tables.applications.iter().rev().filter(|a| a.student_id == *student_id).cloned().collect())
    }

    async fn list_by_job(&self, job_id: &Uuid) -> Result<Vec<JobApplication>, AppError> {
        let tables = self.tables.lock();
        Ok(tables.applications.iter().rev().filter(|a| a.job_id == *job_id).cloned().collect())
    }
}

#[async_trait]
impl ForumRepository for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<ForumPostWithAuthor>, AppError> {
        let tables = self.tables.lock();
        Ok(tables
            .posts
            .iter()
            .rev()
            .map(|post| {
                let author_name = tables.users.iter().find(|u| u.id == post.user_id).map(|u| u.name.clone());
                ForumPostWithAuthor::from(ForumPostRow {
                    id: post.id,
                    user_id: post.user_id,
                    company_name: post.company_name.clone(),
                    title: post.title.clone(),
                    content: post.content.clone(),
                    posted_at: post.posted_at,
                    author_name,
                })
            })
            .collect())
    }

    async fn create_post(&self, post: &ForumPostInsert) -> Result<ForumPost, AppError> {
        let post = ForumPost {
            id: Uuid::new_v4(),
            user_id: post.user_id,
            company_name: post.company_name.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            posted_at: Utc::now(),
        };
        self.tables.lock().posts.push(post.clone());
        Ok(post)
    }

    async fn delete_post(&self, id: &Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock();
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != *id);
        Ok(tables.posts.len() != before)
    }
}

#[async_trait]
impl PptRepository for MemoryStore {
    async fn list_ppts(&self) -> Result<Vec<Ppt>, AppError> {
        Ok(newest_first(&self.tables.lock().ppts))
    }

    async fn create_ppt(&self, ppt: &PptInsert) -> Result<Ppt, AppError> {
        let ppt = Ppt {
            id: Uuid::new_v4(),
            company_name: ppt.company_name.clone(),
            file_url: ppt.file_url.clone(),
            uploaded_by: ppt.uploaded_by,
            uploaded_at: Utc::now(),
        };
        self.tables.lock().ppts.push(ppt.clone());
        Ok(ppt)
    }

    async fn delete_ppt(&self, id: &Uuid) -> Result<Option<Ppt>, AppError> {
        let mut tables = self.tables.lock();
        let index = tables.ppts.iter().position(|p| p.id == *id);
        Ok(index.map(|index| tables.ppts.remove(index)))
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        Ok(newest_first(&self.tables.lock().events))
    }

    async fn get_event(&self, id: &Uuid) -> Result<Option<Event>, AppError> {
        Ok(self.tables.lock().events.iter().find(|e| e.id == *id).cloned())
    }

    async fn create_event(&self, event: &EventInsert) -> Result<Event, AppError> {
        let event = Event {
            id: Uuid::new_v4(),
            title: event.title.clone(),
            description: event.description.clone(),
            event_date: event.event_date,
            event_time: event.event_time,
            created_by: event.created_by,
            created_at: Utc::now(),
        };
        self.tables.lock().events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: &Uuid, changes: &EventChanges) -> Result<Option<Event>, AppError> {
        let mut tables = self.tables.lock();
        Ok(tables.events.iter_mut().find(|e| e.id == *id).map(|event| {
            changes.clone().apply_to(event);
            event.clone()
        }))
    }

    async fn delete_event(&self, id: &Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock();
        let before = tables.events.len();
        tables.events.retain(|e| e.id != *id);
        Ok(tables.events.len() != before)
    }
}

#[async_trait]
impl PlacementRepository for MemoryStore {
    async fn list_placements(&self) -> Result<Vec<Placement>, AppError> {
        Ok(newest_first(&self.tables.lock().placements))
    }

    async fn create_placement(&self, placement: &PlacementInsert) -> Result<Placement, AppError> {
        let placement = Placement {
            id: Uuid::new_v4(),
            company_name: placement.company_name.clone(),
            students_placed: placement.students_placed,
            year: placement.year,
            branch: placement.branch.clone(),
            created_by: placement.created_by,
            created_at: Utc::now(),
        };
        self.tables.lock().placements.push(placement.clone());
        Ok(placement)
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn list_notifications(&self) -> Result<Vec<Notification>, AppError> {
        Ok(newest_first(&self.tables.lock().notifications))
    }

    async fn create_notification(&self, notification: &NotificationInsert) -> Result<Notification, AppError> {
        let notification = Notification {
            id: Uuid::new_v4(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            created_by: notification.created_by,
            created_at: Utc::now(),
        };
        self.tables.lock().notifications.push(notification.clone());
        Ok(notification)
    }
}

pub struct TestApp {
    pub address: String,
    pub store: MemoryStore,
    pub config: AppConfig,
    _upload_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let config = test_config(&upload_dir);
        let store = MemoryStore::default();

        let state = web::Data::new(AppState::new(&config, store.repositories()));
        state.uploads.ensure_dir().await.expect("Failed to prepare upload dir");

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let port = listener.local_addr().expect("Listener has no address").port();
        let address = format!("http://127.0.0.1:{}", port);
        let max_upload_bytes = config.max_upload_bytes;

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(AuthMiddleware)
                .wrap(NormalizePath::trim())
                .configure(|cfg| configure_routes(cfg, max_upload_bytes))
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .run();

        tokio::spawn(server);

        let probe = Client::new();
        while probe.get(format!("{}/health", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        TestApp { address, store, config, _upload_dir: upload_dir }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// A fresh client with its own cookie jar, so each one is a separate session.
    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build client")
    }

    pub async fn signup(&self, client: &Client, body: &Value) -> reqwest::Response {
        client
            .post(self.url("/api/auth/signup"))
            .json(body)
            .send()
            .await
            .expect("Failed to send signup")
    }

    pub async fn login(&self, client: &Client, email: &str, password: &str, role: &str) -> reqwest::Response {
        client
            .post(self.url("/api/auth/login"))
            .json(&json!({"email": email, "password": password, "role": role}))
            .send()
            .await
            .expect("Failed to send login")
    }

    /// Signs up and logs in a new account; returns the session client and user id.
    pub async fn session(&self, role: &str) -> (Client, Uuid) {
        let client = self.client();
        let email = format!("{}-{}@college.edu", role, Uuid::new_v4());
        let password = "Secret123!";

        let response = self
            .signup(&client, &json!({"email": email, "password": password, "name": format!("Test {role}"), "role": role}))
            .await;
        assert_eq!(response.status(), 201, "signup failed for {email}");
        let body: Value = response.json().await.expect("signup body");
        let id = body["id"].as_str().and_then(|s| s.parse().ok()).expect("signup id");

        let response = self.login(&client, &email, password, role).await;
        assert_eq!(response.status(), 200, "login failed for {email}");
        (client, id)
    }

    pub async fn student(&self) -> (Client, Uuid) {
        self.session("student").await
    }

    pub async fn admin(&self) -> (Client, Uuid) {
        self.session("admin").await
    }

    pub async fn set_profile(&self, client: &Client, profile: &Value) {
        let response = client
            .patch(self.url("/api/profile"))
            .json(profile)
            .send()
            .await
            .expect("Failed to update profile");
        assert_eq!(response.status(), 200);
    }

    pub async fn post_job(&self, admin: &Client, job: &Value) -> Value {
        let response = admin
            .post(self.url("/api/jobs"))
            .json(job)
            .send()
            .await
            .expect("Failed to post job");
        assert_eq!(response.status(), 201);
        response.json().await.expect("job body")
    }
}

fn test_config(upload_dir: &TempDir) -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Placement Portal Test".into(),
        port: 0,
        host: "127.0.0.1".into(),
        worker_count: 1,
        database_url: String::new(),
        cors_allowed_origins: "*".into(),
        jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".into(),
        jwt_expiration_days: 1,
        upload_dir: upload_dir.path().to_string_lossy().into_owned(),
        max_upload_bytes: 64 * 1024,
        allow_admin_signup: true,
    }
}
