/// Mutually exclusive named views; exactly one is active at a time.
#[derive(Debug)]
pub struct ViewRouter {
    views: Vec<String>,
    active: usize,
}

impl ViewRouter {
    /// The first view starts active.
    pub fn new(views: &[&str]) -> Self {
        Self {
            views: views.iter().map(|v| v.to_string()).collect(),
            active: 0,
        }
    }

    /// Activates `name` if it is a known view; unknown names leave the
    /// current view in place and return false.
    pub fn activate(&mut self, name: &str) -> bool {
        match self.views.iter().position(|v| v == name) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> &str {
        &self.views[self.active]
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active() == name
    }
}
