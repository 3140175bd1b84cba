use httpmock::Method::{
    DELETE,
    GET,
    PATCH,
    POST,
};
use httpmock::prelude::*;
use httpmock::{
    Mock,
    Then,
    When,
};
use serde_json::json;

pub struct MockServerBuilder {
    server: MockServer,
    handlers: Vec<Box<dyn Fn(When, Then)>>,
    mock_ids: Vec<usize>,
    forbidden: Vec<Box<dyn Fn(When, Then)>>,
    forbidden_ids: Vec<usize>,
}

fn print_req(req: &HttpMockRequest) -> bool {
    // Use println instead of info! so that this works outside of the lib crate
    println!("    Received: {} {}", req.method_str(), req.uri().path());
    true
}

impl MockServerBuilder {
    pub fn new() -> MockServerBuilder {
        MockServerBuilder {
            server: MockServer::start(),
            handlers: vec![],
            mock_ids: vec![],
            forbidden: vec![],
            forbidden_ids: vec![],
        }
    }

    // Every registered handler has to have been hit; polling loops can hit the same one many times
    pub fn assert(&self) {
        for id in &self.mock_ids {
            println!("checking assertions for mock {id}");
            let hits = Mock::new(*id, &self.server).hits();
            assert!(hits > 0, "mock {id} was never called");
        }
        for id in &self.forbidden_ids {
            let hits = Mock::new(*id, &self.server).hits();
            assert_eq!(hits, 0, "forbidden mock {id} was called {hits} time(s)");
        }
    }

    pub fn handle<F: Fn(When, Then) + 'static>(&mut self, f: F) -> &mut Self {
        self.handlers.push(Box::new(move |w, t| {
            let w = w.matches(print_req);
            f(w, t);
        }));
        self
    }

    // Requests matching a forbidden rule still get answered, but fail the assertions
    pub fn forbid<F: Fn(When, Then) + 'static>(&mut self, f: F) -> &mut Self {
        self.forbidden.push(Box::new(move |w, t| {
            let w = w.matches(print_req);
            f(w, t);
        }));
        self
    }

    pub fn forbid_delete(&mut self, path: String) -> &mut Self {
        self.forbid(move |when, then| {
            when.method(DELETE).path(&path);
            then.json_body(status_ok());
        })
    }

    pub fn handle_get(&mut self, path: String, obj: serde_json::Value) -> &mut Self {
        self.handle(move |when, then| {
            when.method(GET).path(&path);
            then.json_body(obj.clone());
        })
    }

    pub fn handle_not_found(&mut self, path: String) -> &mut Self {
        self.handle(move |when, then| {
            when.method(GET).path(&path);
            then.status(404).json_body(status_not_found());
        })
    }

    pub fn handle_list(&mut self, path: String, items: Vec<serde_json::Value>) -> &mut Self {
        self.handle(move |when, then| {
            when.method(GET).path(&path);
            then.json_body(json!({
                "kind": "List",
                "apiVersion": "v1",
                "metadata": {},
                "items": items.clone(),
            }));
        })
    }

    pub fn handle_create(&mut self, path: String, obj: serde_json::Value) -> &mut Self {
        self.handle(move |when, then| {
            when.method(POST).path(&path);
            then.status(201).json_body(obj.clone());
        })
    }

    pub fn handle_patch(&mut self, path: String, obj: serde_json::Value) -> &mut Self {
        self.handle(move |when, then| {
            when.method(PATCH).path(&path);
            then.json_body(obj.clone());
        })
    }

    // The apiserver answers a delete with a Status when the object is gone right away
    pub fn handle_delete(&mut self, path: String) -> &mut Self {
        self.handle(move |when, then| {
            when.method(DELETE).path(&path);
            then.json_body(status_ok());
        })
    }

    pub fn handle_delete_error(&mut self, path: String) -> &mut Self {
        self.handle(move |when, then| {
            when.method(DELETE).path(&path);
            then.status(500).json_body(status_server_error());
        })
    }

    pub fn build(&mut self) {
        for f in self.handlers.iter() {
            self.mock_ids.push(self.server.mock(f).id);
        }
        for f in self.forbidden.iter() {
            self.forbidden_ids.push(self.server.mock(f).id);
        }

        // Print all unmatched/unhandled requests for easier debugging;
        // this has to go last so that the other mock rules have a chance
        // to match first
        self.server.mock(|when, _| {
            when.matches(print_req);
        });
    }

    pub fn url(&self) -> http::Uri {
        http::Uri::try_from(self.server.url("/")).unwrap()
    }
}

pub fn make_fake_apiserver() -> (MockServerBuilder, kube::Client) {
    let builder = MockServerBuilder::new();
    let config = kube::Config::new(builder.url());
    let client = kube::Client::try_from(config).unwrap();
    (builder, client)
}

pub fn status_ok() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Success",
      "code": 200
    })
}

pub fn status_not_found() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "reason": "NotFound",
      "code": 404
    })
}

pub fn status_already_exists() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "reason": "AlreadyExists",
      "code": 409
    })
}

pub fn status_server_error() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "reason": "InternalError",
      "code": 500
    })
}
