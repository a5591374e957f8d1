mod seed;

use std::sync::Arc;

use krishi_core::{
    Availability, ChatMessage, CommunityPost, CropPlan, FarmerProfile, Labour, NewCropPlan,
    NewLabour, NewPost, ProfileUpdate, ValidationError,
};
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

/// Immutable view of everything the app holds in memory. Updates never touch
/// a published snapshot; they build a new one and swap it in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
    pub labour: Vec<Labour>,
    pub crop_plans: Vec<CropPlan>,
    pub profile: FarmerProfile,
    pub posts: Vec<CommunityPost>,
    pub transcript: Vec<ChatMessage>,
}

impl AppState {
    pub fn seeded() -> Self {
        Self {
            labour: seed::labour(),
            crop_plans: seed::crop_plans(),
            profile: seed::profile(),
            posts: seed::posts(),
            transcript: vec![ChatMessage::bot(krishi_core::GREETING)],
        }
    }

    pub fn search_labour(&self, term: &str, availability: Option<Availability>) -> Vec<&Labour> {
        self.labour
            .iter()
            .filter(|labour| labour.matches_search(term))
            .filter(|labour| availability.map_or(true, |wanted| labour.availability == wanted))
            .collect()
    }
}

pub trait ConversationRepository: Send + Sync {
    fn snapshot(&self) -> Arc<AppState>;
    /// Appends in order, then drops the oldest messages beyond `history_limit`.
    fn append_messages(&self, messages: Vec<ChatMessage>, history_limit: usize) -> Arc<AppState>;
}

pub trait FarmRecordRepository: Send + Sync {
    fn add_labour(&self, form: NewLabour) -> Result<Arc<AppState>, ValidationError>;
    fn set_labour_availability(
        &self,
        id: &str,
        availability: Availability,
    ) -> Result<Arc<AppState>, ValidationError>;
    fn add_crop_plan(&self, form: NewCropPlan) -> Result<Arc<AppState>, ValidationError>;
    fn remove_crop_plan(&self, id: &str) -> Result<Arc<AppState>, ValidationError>;
    fn update_profile(&self, update: ProfileUpdate) -> Result<Arc<AppState>, ValidationError>;
    fn add_post(&self, form: NewPost) -> Result<Arc<AppState>, ValidationError>;
    fn toggle_like(&self, post_id: &str) -> Result<Arc<AppState>, ValidationError>;
}

#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<RwLock<Arc<AppState>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_state(AppState::seeded())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(RwLock::new(Arc::new(state))),
        }
    }

    fn commit<F>(&self, update: F) -> Result<Arc<AppState>, ValidationError>
    where
        F: FnOnce(&AppState) -> Result<AppState, ValidationError>,
    {
        let mut current = self.state.write();
        let next = Arc::new(update(&current)?);
        *current = Arc::clone(&next);
        Ok(next)
    }
}

fn next_id() -> String {
    Uuid::new_v4().to_string()
}

impl ConversationRepository for MemoryStore {
    fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state.read())
    }

    fn append_messages(&self, messages: Vec<ChatMessage>, history_limit: usize) -> Arc<AppState> {
        let mut current = self.state.write();
        let mut next = AppState::clone(&current);
        next.transcript.extend(messages);

        if next.transcript.len() > history_limit {
            let keep_from = next.transcript.len() - history_limit;
            next.transcript = next.transcript.split_off(keep_from);
        }

        let next = Arc::new(next);
        *current = Arc::clone(&next);
        next
    }
}

impl FarmRecordRepository for MemoryStore {
    fn add_labour(&self, form: NewLabour) -> Result<Arc<AppState>, ValidationError> {
        let labour = form.into_labour(next_id())?;
        self.commit(|state| {
            let mut next = state.clone();
            next.labour.push(labour);
            Ok(next)
        })
    }

    fn set_labour_availability(
        &self,
        id: &str,
        availability: Availability,
    ) -> Result<Arc<AppState>, ValidationError> {
        self.commit(|state| {
            let mut next = state.clone();
            let labour = next
                .labour
                .iter_mut()
                .find(|labour| labour.id == id)
                .ok_or_else(|| ValidationError::unknown("labour", id))?;
            labour.availability = availability;
            Ok(next)
        })
    }

    fn add_crop_plan(&self, form: NewCropPlan) -> Result<Arc<AppState>, ValidationError> {
        let plan = form.into_plan(next_id())?;
        self.commit(|state| {
            let mut next = state.clone();
            next.crop_plans.push(plan);
            Ok(next)
        })
    }

    fn remove_crop_plan(&self, id: &str) -> Result<Arc<AppState>, ValidationError> {
        self.commit(|state| {
            if !state.crop_plans.iter().any(|plan| plan.id == id) {
                return Err(ValidationError::unknown("crop plan", id));
            }
            let mut next = state.clone();
            next.crop_plans.retain(|plan| plan.id != id);
            Ok(next)
        })
    }

    fn update_profile(&self, update: ProfileUpdate) -> Result<Arc<AppState>, ValidationError> {
        self.commit(|state| {
            let profile = state.profile.apply(update)?;
            Ok(AppState {
                profile,
                ..state.clone()
            })
        })
    }

    fn add_post(&self, form: NewPost) -> Result<Arc<AppState>, ValidationError> {
        let post = form.into_post(next_id())?;
        self.commit(|state| {
            let mut next = state.clone();
            next.posts.insert(0, post);
            Ok(next)
        })
    }

    fn toggle_like(&self, post_id: &str) -> Result<Arc<AppState>, ValidationError> {
        self.commit(|state| {
            let mut next = state.clone();
            let post = next
                .posts
                .iter_mut()
                .find(|post| post.id == post_id)
                .ok_or_else(|| ValidationError::unknown("post", post_id))?;
            *post = post.toggled_like();
            Ok(next)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_leave_earlier_snapshots_untouched() {
        let store = MemoryStore::new();
        let before = store.snapshot();

        let after = store
            .add_labour(NewLabour {
                name: "Biju Thomas".to_string(),
                mobile_number: "9876500000".to_string(),
                skills: "Weeding".to_string(),
                daily_wage: "550".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(before.labour.len(), 3);
        assert_eq!(after.labour.len(), 4);
        assert_eq!(store.snapshot().labour.len(), 4);
        assert_eq!(after.labour[3].daily_wage, 550.0);
    }

    #[test]
    fn rejected_submission_keeps_state() {
        let store = MemoryStore::new();
        let err = store
            .add_labour(NewLabour {
                name: "No Phone".to_string(),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err, ValidationError::MissingField("mobile_number"));
        assert_eq!(store.snapshot().labour.len(), 3);
    }

    #[test]
    fn searches_roster_by_name_or_mobile() {
        let state = AppState::seeded();
        assert_eq!(state.search_labour("suresh", None).len(), 1);
        assert_eq!(state.search_labour("987654321", None).len(), 3);
        assert_eq!(
            state.search_labour("", Some(Availability::NotAvailable)).len(),
            1
        );
        assert!(state
            .search_labour("rajesh", Some(Availability::NotAvailable))
            .is_empty());
    }

    #[test]
    fn changes_availability() {
        let store = MemoryStore::new();
        let id = store.snapshot().labour[0].id.clone();
        let state = store
            .set_labour_availability(&id, Availability::NotAvailable)
            .unwrap();
        assert_eq!(state.labour[0].availability, Availability::NotAvailable);

        let err = store
            .set_labour_availability("missing", Availability::Available)
            .unwrap_err();
        assert_eq!(err, ValidationError::unknown("labour", "missing"));
    }

    #[test]
    fn adds_and_removes_crop_plans() {
        let store = MemoryStore::new();
        let state = store
            .add_crop_plan(NewCropPlan {
                crop: "Banana".to_string(),
                area_acres: 1.5,
                yield_outlook: None,
            })
            .unwrap();
        let id = state.crop_plans.last().map(|p| p.id.clone()).unwrap();

        let state = store.remove_crop_plan(&id).unwrap();
        assert_eq!(state.crop_plans.len(), 3);
        assert!(store.remove_crop_plan(&id).is_err());
        assert!(store.add_crop_plan(NewCropPlan::default()).is_err());
    }

    #[test]
    fn transcript_is_capped() {
        let store = MemoryStore::new();
        let state = store.append_messages(
            vec![
                ChatMessage::user("one"),
                ChatMessage::bot("two"),
                ChatMessage::user("three"),
            ],
            2,
        );
        let contents = state
            .transcript
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>();
        assert_eq!(contents, vec!["two", "three"]);
    }

    #[test]
    fn new_posts_go_first_and_likes_toggle() {
        let store = MemoryStore::new();
        let state = store
            .add_post(NewPost {
                author: "Ravi Kumar".to_string(),
                content: "Drip lines are working well".to_string(),
                ..Default::default()
            })
            .unwrap();
        let id = state.posts[0].id.clone();
        assert_eq!(state.posts.len(), 5);

        let state = store.toggle_like(&id).unwrap();
        assert!(state.posts[0].liked);
        assert_eq!(state.posts[0].likes, 1);

        assert!(store
            .add_post(NewPost {
                content: "  ".to_string(),
                ..Default::default()
            })
            .is_err());
    }

    #[test]
    fn profile_updates_replace_snapshot() {
        let store = MemoryStore::new();
        let state = store
            .update_profile(ProfileUpdate {
                farm_size_acres: Some(6.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(state.profile.farm_size_acres, 6.0);
        assert_eq!(state.profile.name, "Ravi Kumar");
    }
}
