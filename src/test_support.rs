//! Test doubles shared by the unit tests.

use crate::api::{AuthApi, AuthResponse, LoginRequest, RecipeApi, RegisterRequest, SearchApi};
use crate::app::{AuthGate, Route};
use crate::domain::error::{MealShareError, Result};
use crate::domain::{Recipe, SearchResponse, UserProfile};
use crate::storage::{KeyValueStore, MemoryStore, SessionStore};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

fn rejection(status: u16, message: &str) -> MealShareError {
    if status == 401 || status == 403 {
        MealShareError::Auth {
            status,
            message: message.to_string(),
        }
    } else {
        MealShareError::Api {
            status,
            message: message.to_string(),
        }
    }
}

/// Bootstrapped gate with nothing stored, sitting on the login route.
pub fn signed_out_gate() -> AuthGate {
    let mut gate = AuthGate::new(SessionStore::new(MemoryStore::new()), Route::Index);
    gate.bootstrap();
    gate
}

/// Bootstrapped gate with `user` signed in, sitting on their dashboard.
pub fn signed_in_gate(user: UserProfile) -> AuthGate {
    let mut gate = signed_out_gate();
    gate.sign_in("test-token", user).unwrap();
    gate
}

/// Memory store whose reads, writes and removals can be made to fail.
///
/// Clones share state, so a test can keep one clone and hand another to the code
/// under test.
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    inner: Arc<Mutex<MemoryStore>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    fail_removes: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }

    /// Writes a value behind the back of whoever owns the other clone.
    pub fn set_raw(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .unwrap()
            .set_many(&[(key, value.to_string())])
            .unwrap();
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(MealShareError::Storage("injected read failure".to_string()));
        }
        self.inner.lock().unwrap().get(key)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(MealShareError::Storage("injected write failure".to_string()));
        }
        self.inner.lock().unwrap().set_many(entries)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(MealShareError::Storage("injected remove failure".to_string()));
        }
        self.inner.lock().unwrap().remove_many(keys)
    }
}

/// Search port answering from a script, with an optional per-query delay.
///
/// Unscripted queries fail with a network error.
#[derive(Debug, Default)]
pub struct ScriptedSearch {
    script: Mutex<HashMap<String, (Duration, SearchResponse)>>,
    calls: Mutex<Vec<(String, Instant)>>,
    completed: AtomicUsize,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, query: &str, response: SearchResponse) {
        self.respond_after(query, Duration::ZERO, response);
    }

    pub fn respond_after(&self, query: &str, delay: Duration, response: SearchResponse) {
        self.script
            .lock()
            .unwrap()
            .insert(query.to_string(), (delay, response));
    }

    /// Queries received, with the (tokio) time each call started.
    pub fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls that ran to completion.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchApi for ScriptedSearch {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), Instant::now()));
        let scripted = self.script.lock().unwrap().get(query).cloned();

        let outcome = match scripted {
            Some((delay, response)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(response)
            }
            None => Err(MealShareError::Network(format!("no script for {query:?}"))),
        };
        self.completed.fetch_add(1, Ordering::SeqCst);
        outcome
    }
}

/// Auth port that accepts or rejects every request the same way.
#[derive(Debug)]
pub struct FakeAuth {
    outcome: std::result::Result<AuthResponse, (u16, String)>,
    logins: Mutex<Vec<LoginRequest>>,
    registrations: Mutex<Vec<RegisterRequest>>,
}

impl FakeAuth {
    pub fn accepting(response: AuthResponse) -> Self {
        Self {
            outcome: Ok(response),
            logins: Mutex::default(),
            registrations: Mutex::default(),
        }
    }

    pub fn rejecting(status: u16, message: &str) -> Self {
        Self {
            outcome: Err((status, message.to_string())),
            logins: Mutex::default(),
            registrations: Mutex::default(),
        }
    }

    pub fn logins(&self) -> Vec<LoginRequest> {
        self.logins.lock().unwrap().clone()
    }

    pub fn registrations(&self) -> Vec<RegisterRequest> {
        self.registrations.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<AuthResponse> {
        self.outcome
            .clone()
            .map_err(|(status, message)| rejection(status, &message))
    }
}

#[async_trait]
impl AuthApi for FakeAuth {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.logins.lock().unwrap().push(request.clone());
        self.answer()
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.registrations.lock().unwrap().push(request.clone());
        self.answer()
    }
}

/// Recipe port backed by an in-memory table.
#[derive(Debug, Default)]
pub struct FakeRecipes {
    table: Mutex<BTreeMap<i64, Recipe>>,
    next_id: AtomicUsize,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl FakeRecipes {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(100),
            ..Self::default()
        }
    }

    pub fn with(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let fake = Self::new();
        for recipe in recipes {
            fake.insert(recipe);
        }
        fake
    }

    pub fn insert(&self, recipe: Recipe) {
        let id = recipe.id.unwrap();
        self.table.lock().unwrap().insert(id, recipe);
    }

    pub fn get(&self, id: i64) -> Option<Recipe> {
        self.table.lock().unwrap().get(&id).cloned()
    }

    /// Makes every subsequent call fail with a server error.
    pub fn fail_all(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    /// Total number of calls received, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(rejection(500, ""));
        }
        Ok(())
    }

    fn missing(id: i64) -> MealShareError {
        rejection(404, &format!("Recipe {id} not found"))
    }
}

#[async_trait]
impl RecipeApi for FakeRecipes {
    async fn user_recipes(&self, user_id: i64) -> Result<Vec<Recipe>> {
        self.enter()?;
        Ok(self
            .table
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user.as_ref().is_some_and(|u| u.id == user_id))
            .cloned()
            .collect())
    }

    async fn recipe(&self, recipe_id: i64) -> Result<Recipe> {
        self.enter()?;
        self.get(recipe_id).ok_or_else(|| Self::missing(recipe_id))
    }

    async fn create_recipe(&self, recipe: &Recipe) -> Result<Recipe> {
        self.enter()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let saved = Recipe {
            id: Some(id),
            ..recipe.clone()
        };
        self.insert(saved.clone());
        Ok(saved)
    }

    async fn update_recipe(&self, recipe_id: i64, recipe: &Recipe) -> Result<Recipe> {
        self.enter()?;
        if self.get(recipe_id).is_none() {
            return Err(Self::missing(recipe_id));
        }
        let saved = Recipe {
            id: Some(recipe_id),
            ..recipe.clone()
        };
        self.insert(saved.clone());
        Ok(saved)
    }

    async fn delete_recipe(&self, recipe_id: i64) -> Result<()> {
        self.enter()?;
        self.table
            .lock()
            .unwrap()
            .remove(&recipe_id)
            .map(|_| ())
            .ok_or_else(|| Self::missing(recipe_id))
    }
}
