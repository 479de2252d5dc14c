//! Todo-list slice.
//!
//! Holds the ordered sequence of lists. Creates go to the head, fetches keep
//! the server order, and every in-place update leaves positions untouched.

use super::app::RequestStatus;
use super::Slice;
use crate::api::Todolist;

/// Client-only task filter of a list. Never sent to the server.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum FilterValues {
    #[default]
    All,
    Active,
    Completed,
}

/// Todo-list record augmented with client-side view state.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTodolist {
    pub id: String,
    pub title: String,
    pub added_date: String,
    pub order: i64,
    pub filter: FilterValues,
    pub entity_status: RequestStatus,
}

impl From<Todolist> for DomainTodolist {
    fn from(todolist: Todolist) -> Self {
        DomainTodolist {
            id: todolist.id,
            title: todolist.title,
            added_date: todolist.added_date,
            order: todolist.order,
            filter: FilterValues::All,
            entity_status: RequestStatus::Idle,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TodolistsState {
    todolists: Vec<DomainTodolist>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodolistsAction {
    SetTodolists(Vec<Todolist>),
    AddTodolist(Todolist),
    RemoveTodolist { id: String },
    ChangeTodolistTitle { id: String, title: String },
    ChangeTodolistFilter { id: String, filter: FilterValues },
    ChangeTodolistEntityStatus { id: String, entity_status: RequestStatus },
    ClearTodolists,
}

impl TodolistsState {
    pub fn todolists(&self) -> &[DomainTodolist] {
        &self.todolists
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut DomainTodolist> {
        self.todolists.iter_mut().find(|tl| tl.id == id)
    }
}

impl Slice for TodolistsState {
    type Action = TodolistsAction;

    fn reduce(&mut self, action: TodolistsAction) {
        match action {
            TodolistsAction::SetTodolists(todolists) => {
                self.todolists = todolists.into_iter().map(DomainTodolist::from).collect();
            }
            TodolistsAction::AddTodolist(todolist) => {
                self.todolists.insert(0, todolist.into());
            }
            TodolistsAction::RemoveTodolist { id } => {
                if let Some(index) = self.todolists.iter().position(|tl| tl.id == id) {
                    self.todolists.remove(index);
                }
            }
            TodolistsAction::ChangeTodolistTitle { id, title } => {
                if let Some(todolist) = self.find_mut(&id) {
                    todolist.title = title;
                }
            }
            TodolistsAction::ChangeTodolistFilter { id, filter } => {
                if let Some(todolist) = self.find_mut(&id) {
                    todolist.filter = filter;
                }
            }
            TodolistsAction::ChangeTodolistEntityStatus { id, entity_status } => {
                if let Some(todolist) = self.find_mut(&id) {
                    todolist.entity_status = entity_status;
                }
            }
            TodolistsAction::ClearTodolists => self.todolists.clear(),
        }
    }

    fn session_ended(&mut self) {
        self.reduce(TodolistsAction::ClearTodolists);
    }
}
