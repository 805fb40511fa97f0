use crate::client::Executor;
use crate::controllers::{Completion, StateMachineHandle};
use crate::signals::{Signal, SignalBus, WidgetId};
use crate::ui::views::LoginView;
use std::sync::Arc;

enum LoginMsg {
    Submit,
}

pub struct LoginController {
    pub view: LoginView,
    executor: Arc<dyn Executor>,
    state_machine: StateMachineHandle,
    bus: SignalBus<LoginMsg>,
}

impl LoginController {
    pub fn new(
        view: LoginView,
        executor: Arc<dyn Executor>,
        state_machine: StateMachineHandle,
    ) -> Self {
        let mut bus = SignalBus::new();
        bus.connect(view.login_button.id, Signal::Click, || LoginMsg::Submit);
        Self {
            view,
            executor,
            state_machine,
            bus,
        }
    }

    #[cfg(test)]
    pub fn epoch(&self) -> crate::controllers::Epoch {
        self.state_machine.epoch()
    }

    pub fn emit(&mut self, widget: WidgetId, signal: Signal) {
        for msg in self.bus.emit(widget, signal) {
            match msg {
                LoginMsg::Submit => self.handle_login_request(),
            }
        }
    }

    /// Send the typed credentials. Nothing is validated locally: a bad pair
    /// only shows up as an absent result.
    pub fn handle_login_request(&mut self) {
        let username = self.view.username().to_string();
        tracing::debug!(username = %username, "login requested");
        self.executor
            .login(&username, self.view.password())
            .on_done(self.state_machine.marshal(Completion::Login));
    }

    pub fn on_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Login(Some(auth)) => {
                tracing::info!(username = %auth.username, "authenticated");
                self.state_machine.logged_in();
            }
            Completion::Login(None) => {
                self.view
                    .notifier
                    .error_msg("Login failed: check your username and password");
            }
            other => tracing::debug!(?other, "login controller ignoring completion"),
        }
    }
}
