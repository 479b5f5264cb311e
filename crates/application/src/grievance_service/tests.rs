use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use redress_core::{AppError, AppResult};
use redress_domain::{
    Actor, Assignment, Attachment, Category, Comment, Grievance, GrievanceId, Notification,
    NotificationId, Role, Status, TrackingId, User, UserId,
};

use crate::grievance_ports::{
    AddCommentInput, AssignGrievanceInput, AssignmentRepository, AttachFileInput,
    AttachmentRepository, CommentRepository, FileStorage, GrievanceRepository,
    NotificationRepository, SubmitGrievanceInput, UserRepository,
};

use super::GrievanceService;

#[derive(Default)]
struct FakeGrievanceRepository {
    rows: Mutex<Vec<Grievance>>,
    conflicts_before_accept: Mutex<usize>,
    create_attempts: Mutex<usize>,
}

#[async_trait]
impl GrievanceRepository for FakeGrievanceRepository {
    async fn create(&self, grievance: Grievance) -> AppResult<()> {
        *self.create_attempts.lock().await += 1;

        let mut remaining = self.conflicts_before_accept.lock().await;
        if *remaining > 0 {
            *remaining -= 1;
            return Err(AppError::Conflict("tracking id already taken".to_owned()));
        }

        self.rows.lock().await.push(grievance);
        Ok(())
    }

    async fn find(&self, id: GrievanceId) -> AppResult<Option<Grievance>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .find(|row| row.id() == id)
            .cloned())
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> AppResult<Option<Grievance>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .find(|row| row.tracking_id() == tracking_id)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Grievance>> {
        Ok(self.rows.lock().await.clone())
    }

    async fn list_by_owner(&self, owner: UserId) -> AppResult<Vec<Grievance>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.owner() == Some(owner))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        grievance: &Grievance,
        expected_updated_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut rows = self.rows.lock().await;
        let stored = rows
            .iter_mut()
            .find(|row| row.id() == grievance.id())
            .ok_or_else(|| AppError::NotFound("unknown grievance".to_owned()))?;

        if stored.updated_at() != expected_updated_at {
            return Err(AppError::Conflict("grievance moved underneath".to_owned()));
        }

        *stored = grievance.clone();
        Ok(())
    }
}

#[derive(Default)]
struct FakeAssignmentRepository {
    rows: Mutex<Vec<Assignment>>,
}

#[async_trait]
impl AssignmentRepository for FakeAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> AppResult<()> {
        self.rows.lock().await.push(assignment);
        Ok(())
    }

    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Assignment>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.grievance_id() == grievance_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct FakeCommentRepository {
    rows: Mutex<Vec<Comment>>,
}

#[async_trait]
impl CommentRepository for FakeCommentRepository {
    async fn create(&self, comment: Comment) -> AppResult<()> {
        self.rows.lock().await.push(comment);
        Ok(())
    }

    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Comment>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.grievance_id() == grievance_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct FakeAttachmentRepository {
    rows: Mutex<Vec<Attachment>>,
}

#[async_trait]
impl AttachmentRepository for FakeAttachmentRepository {
    async fn create(&self, attachment: Attachment) -> AppResult<()> {
        self.rows.lock().await.push(attachment);
        Ok(())
    }

    async fn list_for_grievance(&self, grievance_id: GrievanceId) -> AppResult<Vec<Attachment>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.grievance_id() == grievance_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct FakeNotificationRepository {
    rows: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for FakeNotificationRepository {
    async fn create(&self, notification: Notification) -> AppResult<()> {
        self.rows.lock().await.push(notification);
        Ok(())
    }

    async fn find(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .find(|row| row.id() == id)
            .cloned())
    }

    async fn list_for_recipient(&self, recipient: UserId) -> AppResult<Vec<Notification>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.recipient() == recipient)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        let mut rows = self.rows.lock().await;
        let stored = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| AppError::NotFound("unknown notification".to_owned()))?;
        stored.mark_read();
        Ok(())
    }
}

#[derive(Default)]
struct FakeUserRepository {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn create(&self, user: User) -> AppResult<()> {
        self.rows.lock().await.push(user);
        Ok(())
    }

    async fn find(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .find(|row| row.id() == id)
            .cloned())
    }

    async fn find_by_subject(&self, subject: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .find(|row| row.subject().as_str() == subject)
            .cloned())
    }
}

#[derive(Default)]
struct FakeFileStorage {
    stored: Mutex<Vec<(String, usize)>>,
}

#[async_trait]
impl FileStorage for FakeFileStorage {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> AppResult<String> {
        self.stored
            .lock()
            .await
            .push((file_name.to_owned(), bytes.len()));
        Ok(format!("uploads/{file_name}"))
    }
}

struct TestBed {
    service: GrievanceService,
    grievances: Arc<FakeGrievanceRepository>,
    assignments: Arc<FakeAssignmentRepository>,
    notifications: Arc<FakeNotificationRepository>,
    users: Arc<FakeUserRepository>,
    storage: Arc<FakeFileStorage>,
}

fn test_bed() -> TestBed {
    let grievances = Arc::new(FakeGrievanceRepository::default());
    let assignments = Arc::new(FakeAssignmentRepository::default());
    let comments = Arc::new(FakeCommentRepository::default());
    let attachments = Arc::new(FakeAttachmentRepository::default());
    let notifications = Arc::new(FakeNotificationRepository::default());
    let users = Arc::new(FakeUserRepository::default());
    let storage = Arc::new(FakeFileStorage::default());

    let service = GrievanceService::new(
        grievances.clone(),
        assignments.clone(),
        comments.clone(),
        attachments.clone(),
        notifications.clone(),
        users.clone(),
        storage.clone(),
    );

    TestBed {
        service,
        grievances,
        assignments,
        notifications,
        users,
        storage,
    }
}

fn actor_with_role(role: Role) -> Actor {
    Actor::new(UserId::new(), "subject", "Test User", role, None)
}

async fn registered_staffer(bed: &TestBed) -> User {
    let user = User::new(
        UserId::new(),
        "staffer",
        "Casey Staffer",
        "casey@college.edu",
        Role::Staff,
        Some("maintenance".to_owned()),
        Utc::now(),
    )
    .unwrap_or_else(|_| unreachable!());
    let _ = bed.users.create(user.clone()).await;
    user
}

fn submission(category: Category) -> SubmitGrievanceInput {
    SubmitGrievanceInput {
        category,
        title: "library ac broken".to_owned(),
        description: "reading hall has been sweltering for days".to_owned(),
        anonymous: false,
        confidential: false,
    }
}

#[tokio::test]
async fn submit_derives_priority_deadline_and_tracking_id() {
    let bed = test_bed();
    let student = actor_with_role(Role::Student);

    let grievance = bed
        .service
        .submit(Some(&student), submission(Category::Urgent))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(grievance.status(), Status::Submitted);
    assert_eq!(grievance.priority().as_str(), "critical");
    assert_eq!(
        grievance.sla_deadline(),
        Some(grievance.created_at() + Duration::hours(24))
    );
    assert_eq!(grievance.owner(), Some(student.user_id()));
    assert!(grievance.tracking_id().as_str().starts_with("GRV-"));

    let notifications = bed
        .notifications
        .list_for_recipient(student.user_id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].message().as_str().contains("received"));
}

#[tokio::test]
async fn anonymous_submission_has_no_owner_and_emits_no_notification() {
    let bed = test_bed();

    let mut input = submission(Category::Infrastructure);
    input.anonymous = true;
    let grievance = bed
        .service
        .submit(None, input)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(grievance.owner(), None);
    assert!(bed.notifications.rows.lock().await.is_empty());
}

#[tokio::test]
async fn submit_regenerates_tracking_id_on_collision() {
    let bed = test_bed();
    *bed.grievances.conflicts_before_accept.lock().await = 2;

    let result = bed
        .service
        .submit(Some(&actor_with_role(Role::Student)), submission(Category::Academic))
        .await;

    assert!(result.is_ok());
    assert_eq!(*bed.grievances.create_attempts.lock().await, 3);
}

#[tokio::test]
async fn submit_surfaces_conflict_after_exhausting_retries() {
    let bed = test_bed();
    *bed.grievances.conflicts_before_accept.lock().await = 50;

    let result = bed
        .service
        .submit(Some(&actor_with_role(Role::Student)), submission(Category::Academic))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(*bed.grievances.create_attempts.lock().await, 5);
}

#[tokio::test]
async fn students_cannot_change_status() {
    let bed = test_bed();
    let student = actor_with_role(Role::Student);
    let grievance = bed
        .service
        .submit(Some(&student), submission(Category::Academic))
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = bed
        .service
        .set_status(&student, grievance.id(), Status::Resolved)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn unknown_grievance_is_not_found() {
    let bed = test_bed();
    let staff = actor_with_role(Role::Staff);

    let result = bed
        .service
        .set_status(&staff, GrievanceId::new(), Status::UnderReview)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn resolution_stamps_resolved_at_once_and_notifies_the_owner() {
    let bed = test_bed();
    let student = actor_with_role(Role::Student);
    let staff = actor_with_role(Role::Staff);
    let grievance = bed
        .service
        .submit(Some(&student), submission(Category::Academic))
        .await
        .unwrap_or_else(|_| unreachable!());

    let resolved = bed
        .service
        .set_status(&staff, grievance.id(), Status::Resolved)
        .await
        .unwrap_or_else(|_| unreachable!());
    let first_resolved_at = resolved.resolved_at();
    assert!(first_resolved_at.is_some());

    // Re-resolving refreshes updated_at but never moves resolved_at.
    let resolved_again = bed
        .service
        .set_status(&staff, grievance.id(), Status::Resolved)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(resolved_again.resolved_at(), first_resolved_at);

    let notifications = bed
        .notifications
        .list_for_recipient(student.user_id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(
        notifications
            .iter()
            .any(|notification| notification.message().as_str().contains("resolved"))
    );
}

#[tokio::test]
async fn status_change_on_anonymous_grievance_notifies_nobody() {
    let bed = test_bed();
    let staff = actor_with_role(Role::Staff);

    let mut input = submission(Category::Infrastructure);
    input.anonymous = true;
    let grievance = bed
        .service
        .submit(None, input)
        .await
        .unwrap_or_else(|_| unreachable!());

    let _ = bed
        .service
        .set_status(&staff, grievance.id(), Status::UnderReview)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(bed.notifications.rows.lock().await.is_empty());
}

#[tokio::test]
async fn priority_override_is_administrator_only_and_reanchors_the_deadline() {
    let bed = test_bed();
    let student = actor_with_role(Role::Student);
    let admin = actor_with_role(Role::Administrator);
    let grievance = bed
        .service
        .submit(Some(&student), submission(Category::Urgent))
        .await
        .unwrap_or_else(|_| unreachable!());
    let original_deadline = grievance.sla_deadline();

    let result = bed
        .service
        .set_priority(&actor_with_role(Role::Staff), grievance.id(), redress_domain::Priority::Low)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let reprioritized = bed
        .service
        .set_priority(&admin, grievance.id(), redress_domain::Priority::Low)
        .await
        .unwrap_or_else(|_| unreachable!());

    // The clock restarts at the change instant with the 120h window.
    assert_eq!(
        reprioritized.sla_deadline(),
        Some(reprioritized.updated_at() + Duration::hours(120))
    );
    assert_ne!(reprioritized.sla_deadline(), original_deadline);
}

#[tokio::test]
async fn comments_leave_the_grievance_untouched_and_internal_stays_staff_only() {
    let bed = test_bed();
    let student = actor_with_role(Role::Student);
    let staff = actor_with_role(Role::Staff);
    let grievance = bed
        .service
        .submit(Some(&student), submission(Category::Academic))
        .await
        .unwrap_or_else(|_| unreachable!());

    let _ = bed
        .service
        .add_comment(
            &student,
            AddCommentInput {
                grievance_id: grievance.id(),
                body: "any update on this?".to_owned(),
                internal: false,
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let stored = bed
        .service
        .get(&student, grievance.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(stored.updated_at(), grievance.updated_at());

    let internal_by_student = bed
        .service
        .add_comment(
            &student,
            AddCommentInput {
                grievance_id: grievance.id(),
                body: "sneaky".to_owned(),
                internal: true,
            },
        )
        .await;
    assert!(matches!(internal_by_student, Err(AppError::Forbidden(_))));

    let _ = bed
        .service
        .add_comment(
            &staff,
            AddCommentInput {
                grievance_id: grievance.id(),
                body: "submitter has a history of this complaint".to_owned(),
                internal: true,
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let student_view = bed
        .service
        .list_comments(&student, grievance.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(student_view.len(), 1);

    let staff_view = bed
        .service
        .list_comments(&staff, grievance.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(staff_view.len(), 2);
}

#[tokio::test]
async fn assignment_history_is_cumulative_and_notifies_the_assignee() {
    let bed = test_bed();
    let admin = actor_with_role(Role::Administrator);
    let staffer = registered_staffer(&bed).await;
    let grievance = bed
        .service
        .submit(Some(&actor_with_role(Role::Student)), submission(Category::Infrastructure))
        .await
        .unwrap_or_else(|_| unreachable!());

    for note in ["first pass", "second pass"] {
        let _ = bed
            .service
            .assign(
                &admin,
                AssignGrievanceInput {
                    grievance_id: grievance.id(),
                    assignee: staffer.id(),
                    note: Some(note.to_owned()),
                    due_at: None,
                },
            )
            .await
            .unwrap_or_else(|_| unreachable!());
    }

    assert_eq!(bed.assignments.rows.lock().await.len(), 2);

    let inbox = bed
        .notifications
        .list_for_recipient(staffer.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(inbox.len(), 2);
    assert!(inbox[0].message().as_str().contains("assigned"));
}

#[tokio::test]
async fn assignment_requires_staff_caller_and_staff_assignee() {
    let bed = test_bed();
    let student = actor_with_role(Role::Student);
    let admin = actor_with_role(Role::Administrator);
    let grievance = bed
        .service
        .submit(Some(&student), submission(Category::Academic))
        .await
        .unwrap_or_else(|_| unreachable!());

    let by_student = bed
        .service
        .assign(
            &student,
            AssignGrievanceInput {
                grievance_id: grievance.id(),
                assignee: UserId::new(),
                note: None,
                due_at: None,
            },
        )
        .await;
    assert!(matches!(by_student, Err(AppError::Forbidden(_))));

    let to_unknown = bed
        .service
        .assign(
            &admin,
            AssignGrievanceInput {
                grievance_id: grievance.id(),
                assignee: UserId::new(),
                note: None,
                due_at: None,
            },
        )
        .await;
    assert!(matches!(to_unknown, Err(AppError::NotFound(_))));

    let student_user = User::new(
        UserId::new(),
        "undergrad",
        "Riley Undergrad",
        "riley@college.edu",
        Role::Student,
        None,
        Utc::now(),
    )
    .unwrap_or_else(|_| unreachable!());
    let _ = bed.users.create(student_user.clone()).await;

    let to_student = bed
        .service
        .assign(
            &admin,
            AssignGrievanceInput {
                grievance_id: grievance.id(),
                assignee: student_user.id(),
                note: None,
                due_at: None,
            },
        )
        .await;
    assert!(matches!(to_student, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn confidential_grievances_are_hidden_from_general_staff() {
    let bed = test_bed();
    let owner = actor_with_role(Role::Student);
    let staff = actor_with_role(Role::Staff);
    let admin = actor_with_role(Role::Administrator);

    let mut input = submission(Category::Administrative);
    input.confidential = true;
    let grievance = bed
        .service
        .submit(Some(&owner), input)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(matches!(
        bed.service.get(&staff, grievance.id()).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(bed.service.get(&admin, grievance.id()).await.is_ok());
    assert!(bed.service.get(&owner, grievance.id()).await.is_ok());

    let staff_list = bed
        .service
        .list_for(&staff)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(staff_list.is_empty());

    let admin_list = bed
        .service
        .list_for(&admin)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(admin_list.len(), 1);
}

#[tokio::test]
async fn tracking_lookup_requires_no_actor() {
    let bed = test_bed();
    let mut input = submission(Category::Infrastructure);
    input.anonymous = true;
    let grievance = bed
        .service
        .submit(None, input)
        .await
        .unwrap_or_else(|_| unreachable!());

    let tracked = bed
        .service
        .track(grievance.tracking_id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(tracked.id(), grievance.id());

    let unknown = TrackingId::generate().unwrap_or_else(|_| unreachable!());
    assert!(matches!(
        bed.service.track(&unknown).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn attachments_store_bytes_and_keep_only_the_issued_path() {
    let bed = test_bed();
    let student = actor_with_role(Role::Student);
    let grievance = bed
        .service
        .submit(Some(&student), submission(Category::Academic))
        .await
        .unwrap_or_else(|_| unreachable!());

    let attachment = bed
        .service
        .attach_file(
            Some(&student),
            AttachFileInput {
                grievance_id: grievance.id(),
                file_name: "photo.jpg".to_owned(),
                content_type: "image/jpeg".to_owned(),
                bytes: vec![0xff; 128],
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(attachment.size_bytes(), 128);
    assert_eq!(attachment.storage_path().as_str(), "uploads/photo.jpg");
    assert_eq!(attachment.uploader(), Some(student.user_id()));
    assert_eq!(bed.storage.stored.lock().await.len(), 1);

    let listed = bed
        .service
        .list_attachments(&student, grievance.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn actorless_uploads_only_reach_anonymous_grievances() {
    let bed = test_bed();
    let owner = actor_with_role(Role::Student);

    let mut anonymous_input = submission(Category::Infrastructure);
    anonymous_input.anonymous = true;
    let anonymous = bed
        .service
        .submit(None, anonymous_input)
        .await
        .unwrap_or_else(|_| unreachable!());

    let mut owned_input = submission(Category::Administrative);
    owned_input.confidential = true;
    let owned = bed
        .service
        .submit(Some(&owner), owned_input)
        .await
        .unwrap_or_else(|_| unreachable!());

    let upload = |grievance_id| AttachFileInput {
        grievance_id,
        file_name: "evidence.pdf".to_owned(),
        content_type: "application/pdf".to_owned(),
        bytes: vec![0x25; 64],
    };

    let attachment = bed
        .service
        .attach_file(None, upload(anonymous.id()))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(attachment.uploader(), None);

    assert!(matches!(
        bed.service.attach_file(None, upload(owned.id())).await,
        Err(AppError::Unauthorized(_))
    ));
    assert_eq!(bed.storage.stored.lock().await.len(), 1);
}
