//! Filtering and lookup over member sequences.
//!
//! [`MemberQuery`] is implemented for both [`Seq<MemberInfo>`](crate::seq::Seq),
//! as returned by [`TypeInfo::members`](crate::info::TypeInfo::members), and
//! `Seq<&MemberInfo>`, as returned by
//! [`TypeInfo::all_members`](crate::info::TypeInfo::all_members).

mod member_query;

pub use member_query::MemberQuery;
