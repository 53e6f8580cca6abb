// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read access to locally cached objects of one kind

use futures::future::BoxFuture;
use futures::FutureExt;
use kube::core::{Selector, SelectorExt};
use kube::runtime::reflector::{ObjectRef, Store};
use kube::{Resource, ResourceExt};
use std::hash::Hash;
use std::sync::Arc;

/// A cached, watch-maintained view of one resource kind.
///
/// Implementations never hand out mutable access; the cache is only written by
/// its watch loop.
pub trait Lister<K>: Send + Sync {
    /// Objects in `namespace` (all namespaces when `None`) whose labels match `selector`,
    /// ordered by namespace and name
    fn list(&self, namespace: Option<&str>, selector: &Selector) -> Vec<Arc<K>>;

    fn get(&self, namespace: Option<&str>, name: &str) -> Option<Arc<K>>;

    /// Resolves to `true` once the initial list has been replayed into the cache,
    /// or `false` if the cache can no longer become ready
    fn wait_synced(&self) -> BoxFuture<'_, bool>;
}

impl<K> Lister<K> for Store<K>
where
    K: Resource + Clone + Send + Sync + 'static,
    K::DynamicType: Eq + Hash + Clone + Default + Send + Sync,
{
    fn list(&self, namespace: Option<&str>, selector: &Selector) -> Vec<Arc<K>> {
        let mut objects: Vec<Arc<K>> = self
            .state()
            .into_iter()
            .filter(|obj| namespace.map_or(true, |ns| obj.meta().namespace.as_deref() == Some(ns)))
            .filter(|obj| selector.matches(obj.labels()))
            .collect();
        objects.sort_by(|a, b| {
            (a.meta().namespace.as_deref(), a.meta().name.as_deref())
                .cmp(&(b.meta().namespace.as_deref(), b.meta().name.as_deref()))
        });
        objects
    }

    fn get(&self, namespace: Option<&str>, name: &str) -> Option<Arc<K>> {
        let key = match namespace {
            Some(ns) => ObjectRef::new(name).within(ns),
            None => ObjectRef::new(name),
        };
        Store::get(self, &key)
    }

    fn wait_synced(&self) -> BoxFuture<'_, bool> {
        self.wait_until_ready().map(|ready| ready.is_ok()).boxed()
    }
}
