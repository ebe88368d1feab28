#![allow(dead_code)]
//! Test harness utilities for threadline-core integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use threadline_core::client::{
    AdminApi, Api, BrowseRequest, ClientError, CommentsApi, CommentsEnvelope, MemberApi,
    RepliesRequest,
};
use threadline_types::state::tree;
use threadline_types::{
    Comment, CommentDraft, CommentEdit, CommentId, CommentStatus, CommentsState, Member,
    MemberPatch, Pagination,
};

/// How the fake answers `member.update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberBehavior {
    Echo,
    ReturnNothing,
    Reject,
}

struct Inner {
    /// Server-side tree, newest first, with every reply.
    comments: Vec<Comment>,
    member: Option<Member>,
    member_behavior: MemberBehavior,
    next_id: u64,
    page_size: usize,
    initial_replies: usize,
    failing: HashSet<&'static str>,
    failing_nth: HashMap<&'static str, usize>,
    calls: Vec<String>,
}

/// In-memory comments backend implementing every client trait.
pub struct FakeServer {
    inner: Mutex<Inner>,
}

impl FakeServer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                comments: Vec::new(),
                member: None,
                member_behavior: MemberBehavior::Echo,
                next_id: 100,
                page_size: 2,
                initial_replies: 1,
                failing: HashSet::new(),
                failing_nth: HashMap::new(),
                calls: Vec::new(),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    /// Seed `top` comments (ids `c{n}`, newest first) with `replies` replies each (`c{n}r{m}`).
    pub fn seed(&self, top: usize, replies: usize) {
        let mut inner = self.lock();
        inner.comments = (0..top)
            .rev()
            .map(|n| {
                let mut c = Comment::new(format!("c{}", n).as_str(), format!("comment {}", n));
                c.replies = (0..replies)
                    .map(|m| {
                        let mut r = Comment::new(format!("c{}r{}", n, m).as_str(), format!("reply {}", m));
                        r.parent_id = Some(c.id.clone());
                        r
                    })
                    .collect();
                c.count.replies = replies as i64;
                c
            })
            .collect();
    }

    pub fn set_member(&self, member: Member) {
        self.lock().member = Some(member);
    }

    pub fn set_member_behavior(&self, behavior: MemberBehavior) {
        self.lock().member_behavior = behavior;
    }

    /// Id the next created comment gets.
    pub fn set_next_id(&self, id: u64) {
        self.lock().next_id = id;
    }

    pub fn set_page_size(&self, size: usize) {
        self.lock().page_size = size;
    }

    /// Make an endpoint (e.g. `"comments.read"`) reject every call.
    pub fn fail(&self, endpoint: &'static str) {
        self.lock().failing.insert(endpoint);
    }

    /// Reject only the `n`-th call (1-based) to an endpoint.
    pub fn fail_nth(&self, endpoint: &'static str, n: usize) {
        self.lock().failing_nth.insert(endpoint, n);
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn status_of(&self, id: &str) -> Option<CommentStatus> {
        tree::find_comment(&self.lock().comments, &CommentId::new(id)).map(|c| c.status)
    }

    pub fn visible_total(&self) -> i64 {
        tree::visible_total(&self.lock().comments)
    }

    /// Initial widget state, as a host page would build it from the first browse.
    pub fn initial_state(&self, post_id: &str) -> CommentsState {
        let inner = self.lock();
        CommentsState {
            comment_count: tree::visible_total(&inner.comments),
            member: inner.member.clone(),
            ..CommentsState::new(post_id)
        }
    }

    fn call(&self, endpoint: &'static str, detail: String) -> Result<MutexGuard<'_, Inner>, ClientError> {
        let mut inner = self.lock();
        inner.calls.push(if detail.is_empty() { endpoint.to_string() } else { format!("{} {}", endpoint, detail) });
        let nth = inner.calls.iter().filter(|c| c.split(' ').next() == Some(endpoint)).count();
        if inner.failing.contains(endpoint) || inner.failing_nth.get(endpoint) == Some(&nth) {
            return Err(ClientError::Rejected { endpoint, message: "not allowed".to_string() });
        }
        Ok(inner)
    }
}

impl Inner {
    /// Record as the member sees it: replies trimmed to the first page.
    fn member_view(&self, comment: &Comment) -> Comment {
        let mut c = comment.clone();
        c.replies.truncate(self.initial_replies);
        c
    }

    fn node_mut(&mut self, id: &CommentId) -> Result<&mut Comment, ClientError> {
        tree::find_comment_mut(&mut self.comments, id).ok_or_else(|| ClientError::Rejected {
            endpoint: "comments",
            message: format!("no comment {}", id),
        })
    }
}

impl CommentsApi for FakeServer {
    fn browse(&self, request: &BrowseRequest) -> Result<CommentsEnvelope, ClientError> {
        let inner = self.call("comments.browse", format!("page={} post={}", request.page, request.post_id))?;
        let size = inner.page_size;
        let total = inner.comments.len();
        let pages = total.div_ceil(size).max(1) as u32;
        let start = (request.page as usize - 1) * size;
        let comments = inner
            .comments
            .iter()
            .skip(start)
            .take(size)
            .map(|c| inner.member_view(c))
            .collect();
        let pagination = Pagination {
            page: request.page,
            limit: size as u32,
            pages,
            total: total as u64,
            next: (request.page < pages).then_some(request.page + 1),
            prev: (request.page > 1).then_some(request.page - 1),
        };
        Ok(CommentsEnvelope::new(comments).with_pagination(pagination))
    }

    fn replies(&self, request: &RepliesRequest) -> Result<CommentsEnvelope, ClientError> {
        let after = request.after_reply_id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        let mut inner = self.call(
            "comments.replies",
            format!("{} after={} limit={}", request.comment_id, after, request.limit),
        )?;
        let parent = inner.node_mut(&request.comment_id)?;
        let start = match &request.after_reply_id {
            Some(id) => parent.replies.iter().position(|r| &r.id == id).map_or(0, |i| i + 1),
            None => 0,
        };
        let replies = parent
            .replies
            .iter()
            .skip(start)
            .take(request.limit as usize)
            .cloned()
            .collect();
        Ok(CommentsEnvelope::new(replies))
    }

    fn add(&self, draft: &CommentDraft) -> Result<CommentsEnvelope, ClientError> {
        let mut inner = self.call("comments.add", draft.html.clone())?;
        let id = inner.next_id;
        inner.next_id += 1;
        let mut comment = Comment::new(id.to_string().as_str(), draft.html.clone());
        comment.parent_id = draft.parent_id.clone();
        comment.member = inner.member.as_ref().map(Member::to_ref);

        match &draft.parent_id {
            Some(parent_id) => {
                let parent = inner.node_mut(parent_id)?;
                parent.replies.push(comment.clone());
                parent.count.replies += 1;
            }
            None => inner.comments.insert(0, comment.clone()),
        }
        Ok(CommentsEnvelope::new(vec![comment]))
    }

    fn edit(&self, edit: &CommentEdit) -> Result<CommentsEnvelope, ClientError> {
        let mut inner = self.call("comments.edit", edit.id.to_string())?;
        let node = inner.node_mut(&edit.id)?;
        if let Some(html) = &edit.html {
            node.html = Some(html.clone());
            node.edited_at = Some("2024-01-01T00:00:00.000Z".to_string());
        }
        if let Some(status) = edit.status {
            node.status = status;
        }
        let node = node.clone();
        Ok(CommentsEnvelope::new(vec![inner.member_view(&node)]))
    }

    fn read(&self, id: &CommentId) -> Result<CommentsEnvelope, ClientError> {
        let mut inner = self.call("comments.read", id.to_string())?;
        let node = inner.node_mut(id)?.clone();
        Ok(CommentsEnvelope::new(vec![inner.member_view(&node)]))
    }

    fn like(&self, id: &CommentId) -> Result<(), ClientError> {
        let mut inner = self.call("comments.like", id.to_string())?;
        let node = inner.node_mut(id)?;
        node.liked = true;
        node.count.likes += 1;
        Ok(())
    }

    fn unlike(&self, id: &CommentId) -> Result<(), ClientError> {
        let mut inner = self.call("comments.unlike", id.to_string())?;
        let node = inner.node_mut(id)?;
        node.liked = false;
        node.count.likes -= 1;
        Ok(())
    }

    fn report(&self, id: &CommentId) -> Result<(), ClientError> {
        self.call("comments.report", id.to_string())?;
        Ok(())
    }
}

impl MemberApi for FakeServer {
    fn update(&self, patch: &MemberPatch) -> Result<Option<Member>, ClientError> {
        let detail = serde_json::to_string(patch)?;
        let mut inner = self.call("member.update", detail)?;
        match inner.member_behavior {
            MemberBehavior::Reject => Err(ClientError::Rejected {
                endpoint: "member.update",
                message: "validation failed".to_string(),
            }),
            MemberBehavior::ReturnNothing => Ok(None),
            MemberBehavior::Echo => {
                let member = inner.member.get_or_insert_with(|| Member::new("m-new"));
                if let Some(name) = &patch.name {
                    member.name = Some(name.clone());
                }
                if let Some(bio) = &patch.bio {
                    member.bio = bio.clone();
                }
                Ok(Some(member.clone()))
            }
        }
    }
}

impl AdminApi for FakeServer {
    fn hide_comment(&self, id: &CommentId) -> Result<(), ClientError> {
        let mut inner = self.call("admin.hide", id.to_string())?;
        inner.node_mut(id)?.status = CommentStatus::Hidden;
        Ok(())
    }

    fn show_comment(&self, id: &CommentId) -> Result<(), ClientError> {
        let mut inner = self.call("admin.show", id.to_string())?;
        inner.node_mut(id)?.status = CommentStatus::Published;
        Ok(())
    }
}

/// Member + admin API bundle backed by one fake server.
pub fn admin_api(server: &Arc<FakeServer>) -> Api {
    member_api(server).with_admin(server.clone())
}

/// Member-only API bundle (no admin client).
pub fn member_api(server: &Arc<FakeServer>) -> Api {
    Api::new(server.clone(), server.clone())
}

pub fn ids(comments: &[Comment]) -> Vec<String> {
    comments.iter().map(|c| c.id.to_string()).collect()
}
