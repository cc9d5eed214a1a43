// tests/support/mocks/repos.rs
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use qaboard::domain::errors::{DomainError, DomainResult};
use qaboard::domain::pager::Pager;
use qaboard::domain::profile::{Profile, ProfileHits, ProfileRepository, SpacesPatch};
use qaboard::domain::space::{Space, SpaceRepository};

/* -------------------------------- ProfileRepository -------------------------------- */

/// Profiles keyed (and therefore ordered) by id, standing in for the backend's
/// document id ordering. Every query and patch batch is recorded.
///
/// Like a real backend it may cap pages below the requested limit, hold
/// records the adapter cannot map, or fail on a given search.
#[derive(Default)]
pub struct InMemoryProfileRepo {
    profiles: Mutex<BTreeMap<String, Profile>>,
    queries: Mutex<Vec<String>>,
    batches: Mutex<Vec<Vec<SpacesPatch>>>,
    find_calls: AtomicUsize,
    page_cap: Option<usize>,
    malformed: Vec<String>,
    fail_on_find: Mutex<Option<usize>>,
}

impl InMemoryProfileRepo {
    pub fn new(profiles: Vec<Profile>) -> Self {
        let map = profiles
            .into_iter()
            .map(|p| (p.id.as_str().to_string(), p))
            .collect();
        Self {
            profiles: Mutex::new(map),
            ..Self::default()
        }
    }

    /// Never return more than `cap` records per page, whatever was requested.
    pub fn with_page_cap(mut self, cap: usize) -> Self {
        self.page_cap = Some(cap);
        self
    }

    /// Records with these ids take up room on a page but are dropped on
    /// mapping, as unparseable backend records are.
    pub fn with_malformed(mut self, ids: &[&str]) -> Self {
        self.malformed = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    /// Make the `n`th search (1-based, counted from now) fail.
    pub fn fail_on_find(&self, n: usize) {
        let done = self.find_calls();
        *self.fail_on_find.lock().unwrap() = Some(done + n);
    }

    pub fn recover(&self) {
        *self.fail_on_find.lock().unwrap() = None;
    }

    pub fn get(&self, id: &str) -> Option<Profile> {
        self.profiles.lock().unwrap().get(id).cloned()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn batches(&self) -> Vec<Vec<SpacesPatch>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

/// `_id:("a" "b")` yields the quoted ids; any other query matches everything.
fn selected_ids(query: &str) -> Option<Vec<String>> {
    let inner = query.strip_prefix("_id:(")?.strip_suffix(')')?;
    Some(
        inner
            .split_whitespace()
            .map(|id| id.trim_matches('"').to_string())
            .collect(),
    )
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepo {
    async fn find(&self, query: &str, pager: &mut Pager) -> DomainResult<ProfileHits> {
        let call = self.find_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.queries.lock().unwrap().push(query.to_string());
        if *self.fail_on_find.lock().unwrap() == Some(call) {
            return Err(DomainError::Persistence("backend unavailable".into()));
        }

        let map = self.profiles.lock().unwrap();
        let matched: Vec<&Profile> = match selected_ids(query) {
            Some(ids) => map.values().filter(|p| ids.iter().any(|id| id == p.id.as_str())).collect(),
            None => map.values().collect(),
        };
        pager.count = matched.len() as u64;

        let limit = self.page_cap.map_or(pager.limit as usize, |cap| cap.min(pager.limit as usize));
        let page: Vec<Profile> = match pager.last_key.as_deref() {
            Some(last) => matched
                .into_iter()
                .filter(|p| p.id.as_str() > last)
                .take(limit)
                .cloned()
                .collect(),
            None => matched
                .into_iter()
                .skip((pager.page.saturating_sub(1) as usize) * limit)
                .take(limit)
                .cloned()
                .collect(),
        };

        if let Some(last) = page.last() {
            pager.last_key = Some(last.id.as_str().to_string());
        }
        let fetched = page.len();
        let profiles = page
            .into_iter()
            .filter(|p| !self.malformed.iter().any(|id| id == p.id.as_str()))
            .collect();
        Ok(ProfileHits { profiles, fetched })
    }

    async fn patch_spaces(&self, patches: Vec<SpacesPatch>) -> DomainResult<()> {
        let mut map = self.profiles.lock().unwrap();
        for patch in &patches {
            if let Some(profile) = map.get_mut(&patch.id) {
                profile.spaces = patch.spaces.clone();
            }
        }
        self.batches.lock().unwrap().push(patches);
        Ok(())
    }
}

/// Backend that is down.
#[derive(Default)]
pub struct FailingProfileRepo;

#[async_trait]
impl ProfileRepository for FailingProfileRepo {
    async fn find(&self, _query: &str, _pager: &mut Pager) -> DomainResult<ProfileHits> {
        Err(DomainError::Persistence("backend unreachable".into()))
    }

    async fn patch_spaces(&self, _patches: Vec<SpacesPatch>) -> DomainResult<()> {
        Err(DomainError::Persistence("backend unreachable".into()))
    }
}

/* -------------------------------- SpaceRepository -------------------------------- */

#[derive(Default)]
pub struct InMemorySpaceRepo {
    spaces: Vec<Space>,
    find_calls: AtomicUsize,
}

impl InMemorySpaceRepo {
    pub fn new(names: &[&str]) -> Self {
        Self {
            spaces: names
                .iter()
                .map(|name| Space {
                    id: format!("space:{name}"),
                    name: (*name).to_string(),
                })
                .collect(),
            find_calls: AtomicUsize::new(0),
        }
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpaceRepository for InMemorySpaceRepo {
    async fn find_all(&self, pager: &mut Pager) -> DomainResult<Vec<Space>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        pager.count = self.spaces.len() as u64;
        Ok(self.spaces.iter().take(pager.limit as usize).cloned().collect())
    }
}
