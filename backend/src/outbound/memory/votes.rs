//! `VoteRepository` over the in-memory store.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::ports::{NewVote, VoteChange, VotePersistenceError, VoteRepository, VoteUpdate};
use crate::domain::{UserId, Vote, VoteId};

use super::{InMemoryStore, next_id};

fn newest_first(mut votes: Vec<Vote>) -> Vec<Vote> {
    votes.sort_by(|a, b| b.date_time.cmp(&a.date_time).then(b.id.cmp(&a.id)));
    votes
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn insert(&self, vote: &NewVote) -> Result<Vote, VotePersistenceError> {
        let mut state = self.lock();
        if !state.users.contains_key(&vote.user_id.get()) {
            return Err(VotePersistenceError::unknown_user(vote.user_id.get()));
        }
        if !state.restaurants.contains_key(&vote.restaurant_id.get()) {
            return Err(VotePersistenceError::unknown_restaurant(
                vote.restaurant_id.get(),
            ));
        }
        let date = vote.date_time.date();
        if state
            .votes
            .values()
            .any(|stored| stored.user_id == vote.user_id && stored.voted_on() == date)
        {
            return Err(VotePersistenceError::duplicate_daily_vote(
                vote.user_id.get(),
                date,
            ));
        }

        let raw_id = next_id(&mut state.vote_seq);
        let id = VoteId::new(raw_id)
            .map_err(|err| VotePersistenceError::query(format!("vote sequence exhausted: {err}")))?;
        let stored = Vote {
            id,
            user_id: vote.user_id,
            restaurant_id: vote.restaurant_id,
            date_time: vote.date_time,
        };
        state.votes.insert(raw_id, stored.clone());
        Ok(stored)
    }

    async fn update_for_user(
        &self,
        change: &VoteChange,
    ) -> Result<VoteUpdate, VotePersistenceError> {
        let mut state = self.lock();
        if let Some(restaurant_id) = change.restaurant_id {
            if !state.restaurants.contains_key(&restaurant_id.get()) {
                return Err(VotePersistenceError::unknown_restaurant(restaurant_id.get()));
            }
        }
        let Some(current) = state.votes.get_mut(&change.id.get()) else {
            return Ok(VoteUpdate::Missing);
        };
        if current.user_id != change.user_id {
            return Ok(VoteUpdate::NotOwned {
                owner: current.user_id,
            });
        }
        if current.voted_on() != change.date_time.date() {
            return Ok(VoteUpdate::OtherDay {
                voted_on: current.voted_on(),
            });
        }

        if let Some(restaurant_id) = change.restaurant_id {
            current.restaurant_id = restaurant_id;
        }
        current.date_time = change.date_time;
        Ok(VoteUpdate::Updated(current.clone()))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Vote>, VotePersistenceError> {
        let votes = self
            .lock()
            .votes
            .values()
            .filter(|vote| vote.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(votes))
    }

    async fn list_for_user_between(
        &self,
        user_id: UserId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Vote>, VotePersistenceError> {
        let votes = self
            .lock()
            .votes
            .values()
            .filter(|vote| vote.user_id == user_id && (from..=to).contains(&vote.date_time))
            .cloned()
            .collect();
        Ok(newest_first(votes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{RestaurantRepository, UserRepository};
    use crate::domain::{
        Email, RestaurantDraft, RestaurantId, RestaurantName, UserDraft, UserName, day_bounds,
    };
    use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
    use rstest::{fixture, rstest};

    struct Seeded {
        store: InMemoryStore,
        ada: UserId,
        grace: UserId,
        noma: RestaurantId,
        panisse: RestaurantId,
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("valid fixture datetime")
    }

    async fn add_user(store: &InMemoryStore, name: &str, email: &str) -> UserId {
        let draft = UserDraft::new(
            UserName::new(name).expect("valid name"),
            Email::new(email).expect("valid email"),
        );
        UserRepository::create(store, &draft, DateTime::<Utc>::UNIX_EPOCH)
            .await
            .expect("create user")
            .id
    }

    async fn add_restaurant(store: &InMemoryStore, name: &str) -> RestaurantId {
        let draft = RestaurantDraft {
            name: RestaurantName::new(name).expect("valid name"),
        };
        RestaurantRepository::create(store, &draft)
            .await
            .expect("create restaurant")
            .id
    }

    #[fixture]
    async fn seeded() -> Seeded {
        let store = InMemoryStore::new();
        let ada = add_user(&store, "Ada", "ada@example.com").await;
        let grace = add_user(&store, "Grace", "grace@example.com").await;
        let noma = add_restaurant(&store, "Noma").await;
        let panisse = add_restaurant(&store, "Chez Panisse").await;
        Seeded {
            store,
            ada,
            grace,
            noma,
            panisse,
        }
    }

    impl Seeded {
        async fn vote(&self, user_id: UserId, date_time: NaiveDateTime) -> Vote {
            self.store
                .insert(&NewVote {
                    user_id,
                    restaurant_id: self.noma,
                    date_time,
                })
                .await
                .expect("insert vote")
        }
    }

    #[rstest]
    #[tokio::test]
    async fn second_vote_on_the_same_day_is_rejected(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        seeded.vote(seeded.ada, at(19, 9, 0)).await;

        let error = seeded
            .store
            .insert(&NewVote {
                user_id: seeded.ada,
                restaurant_id: seeded.panisse,
                date_time: at(19, 23, 59),
            })
            .await
            .expect_err("duplicate");

        assert_eq!(
            error,
            VotePersistenceError::duplicate_daily_vote(seeded.ada.get(), at(19, 0, 0).date())
        );
        seeded.vote(seeded.ada, at(20, 0, 0)).await;
        seeded.vote(seeded.grace, at(19, 9, 0)).await;
    }

    #[rstest]
    #[tokio::test]
    async fn insert_checks_references(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let error = seeded
            .store
            .insert(&NewVote {
                user_id: seeded.ada,
                restaurant_id: RestaurantId::new(99).expect("valid id"),
                date_time: at(19, 9, 0),
            })
            .await
            .expect_err("unknown restaurant");

        assert_eq!(error, VotePersistenceError::unknown_restaurant(99));
    }

    #[rstest]
    #[tokio::test]
    async fn owner_updates_same_day_vote(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let vote = seeded.vote(seeded.ada, at(19, 9, 0)).await;

        let update = seeded
            .store
            .update_for_user(&VoteChange {
                id: vote.id,
                user_id: seeded.ada,
                restaurant_id: Some(seeded.panisse),
                date_time: at(19, 10, 30),
            })
            .await
            .expect("update");

        assert_eq!(
            update,
            VoteUpdate::Updated(Vote {
                restaurant_id: seeded.panisse,
                date_time: at(19, 10, 30),
                ..vote
            })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn other_users_vote_is_left_untouched(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let vote = seeded.vote(seeded.ada, at(19, 9, 0)).await;

        let update = seeded
            .store
            .update_for_user(&VoteChange {
                id: vote.id,
                user_id: seeded.grace,
                restaurant_id: Some(seeded.panisse),
                date_time: at(19, 10, 0),
            })
            .await
            .expect("update");

        assert_eq!(update, VoteUpdate::NotOwned { owner: seeded.ada });
        assert_eq!(seeded.store.list_for_user(seeded.ada).await, Ok(vec![vote]));
    }

    #[rstest]
    #[tokio::test]
    async fn change_to_another_day_is_refused(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let vote = seeded.vote(seeded.ada, at(18, 9, 0)).await;

        let update = seeded
            .store
            .update_for_user(&VoteChange {
                id: vote.id,
                user_id: seeded.ada,
                restaurant_id: None,
                date_time: at(19, 9, 0),
            })
            .await
            .expect("update");

        assert_eq!(
            update,
            VoteUpdate::OtherDay {
                voted_on: at(18, 0, 0).date()
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn missing_vote_is_reported(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let update = seeded
            .store
            .update_for_user(&VoteChange {
                id: VoteId::new(404).expect("valid id"),
                user_id: seeded.ada,
                restaurant_id: None,
                date_time: at(19, 9, 0),
            })
            .await
            .expect("update");

        assert_eq!(update, VoteUpdate::Missing);
    }

    #[rstest]
    #[tokio::test]
    async fn range_includes_both_boundary_days(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let before = seeded.vote(seeded.ada, at(9, 23, 59)).await;
        let first = seeded.vote(seeded.ada, at(10, 0, 0)).await;
        let last = seeded
            .vote(seeded.ada, at(12, 0, 0) + TimeDelta::days(1) - TimeDelta::seconds(1))
            .await;
        let after = seeded.vote(seeded.ada, at(13, 0, 0)).await;
        seeded.vote(seeded.grace, at(11, 12, 0)).await;

        let start = at(10, 0, 0).date();
        let end = at(12, 0, 0).date();
        let (from, to) = day_bounds(start, end);
        let votes = seeded
            .store
            .list_for_user_between(seeded.ada, from, to)
            .await
            .expect("list");

        assert_eq!(votes, vec![last, first]);
        assert!(!votes.contains(&before) && !votes.contains(&after));
    }

    #[rstest]
    #[tokio::test]
    async fn history_is_newest_first(#[future] seeded: Seeded) {
        let seeded = seeded.await;
        let older = seeded.vote(seeded.ada, at(17, 9, 0)).await;
        let newer = seeded.vote(seeded.ada, at(18, 9, 0)).await;

        assert_eq!(
            seeded.store.list_for_user(seeded.ada).await,
            Ok(vec![newer, older])
        );
    }
}
