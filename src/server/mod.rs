//! TCP accept loop, one task per connection.

pub mod listener;
