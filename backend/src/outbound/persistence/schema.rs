//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; `diesel print-schema`
//! against a migrated database regenerates them.

diesel::table! {
    /// Registered users. `email` is unique.
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        /// Granted roles, stored by name (`user`, `admin`).
        roles -> Array<Text>,
        enabled -> Bool,
        registered -> Timestamptz,
    }
}

diesel::table! {
    /// Restaurants users can vote for. `name` is unique.
    restaurants (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// One row per user and calendar day.
    votes (id) {
        id -> Int4,
        user_id -> Int4,
        restaurant_id -> Int4,
        /// Server-local wall clock time of the vote.
        date_time -> Timestamp,
        /// Generated from `date_time`; backs the one-vote-per-day constraint.
        vote_date -> Date,
    }
}

diesel::joinable!(votes -> users (user_id));
diesel::joinable!(votes -> restaurants (restaurant_id));

diesel::allow_tables_to_appear_in_same_query!(restaurants, users, votes);
