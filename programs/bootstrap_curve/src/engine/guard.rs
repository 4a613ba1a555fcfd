//! Scoped call guard.
//!
//! Entering sets `Launch::in_call` and snapshots the account. Dropping the
//! guard without [`CallGuard::commit`] puts the snapshot back, so an error
//! returned with `?` anywhere inside a call leaves the launch exactly as it
//! was. The flag is cleared on every exit path.

use std::ops::{Deref, DerefMut};

use anchor_lang::prelude::*;

use crate::error::CurveError;
use crate::state::Launch;

pub struct CallGuard<'a> {
    launch: &'a mut Launch,
    snapshot: Option<Launch>,
}

impl<'a> CallGuard<'a> {
    pub fn enter(launch: &'a mut Launch) -> Result<Self> {
        require!(!launch.in_call, CurveError::ReentrantCall);
        let snapshot = launch.clone();
        launch.in_call = true;
        Ok(Self {
            launch,
            snapshot: Some(snapshot),
        })
    }

    /// Keep every change made through the guard.
    pub fn commit(mut self) {
        self.snapshot = None;
    }
}

impl Deref for CallGuard<'_> {
    type Target = Launch;

    fn deref(&self) -> &Launch {
        self.launch
    }
}

impl DerefMut for CallGuard<'_> {
    fn deref_mut(&mut self) -> &mut Launch {
        self.launch
    }
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.launch = snapshot;
        }
        self.launch.in_call = false;
    }
}
