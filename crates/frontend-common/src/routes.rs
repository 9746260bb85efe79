//! Route table

use yew_router::Routable;

/// Every page the application can show
#[derive(Routable, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/dashboard")]
    Dashboard,
    #[at("/cv")]
    CvUpload,
    #[at("/jobs")]
    JobSearch,
    #[at("/jobs/:id")]
    JobDetail { id: String },
    #[at("/motivation-letters")]
    MotivationLetters,
    #[at("/applications")]
    Applications,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Static configuration of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: Option<&'static str>,
    /// View module loaded lazily when the route is entered
    pub view: Option<&'static str>,
    /// Path this route forwards to before any guard runs
    pub redirect: Option<&'static str>,
    /// `None` means the route requires authentication
    pub requires_auth: Option<bool>,
}

impl RouteDescriptor {
    /// Anything not explicitly marked `false` is protected
    pub fn requires_auth(&self) -> bool {
        self.requires_auth != Some(false)
    }
}

const ROOT: RouteDescriptor = RouteDescriptor {
    path: "/",
    name: None,
    view: None,
    redirect: Some("/dashboard"),
    requires_auth: None,
};

const LOGIN: RouteDescriptor = RouteDescriptor {
    path: "/login",
    name: Some("Login"),
    view: Some("auth/LoginView"),
    redirect: None,
    requires_auth: Some(false),
};

const REGISTER: RouteDescriptor = RouteDescriptor {
    path: "/register",
    name: Some("Register"),
    view: Some("auth/RegisterView"),
    redirect: None,
    requires_auth: Some(false),
};

const DASHBOARD: RouteDescriptor = RouteDescriptor {
    path: "/dashboard",
    name: Some("Dashboard"),
    view: Some("dashboard/DashboardView"),
    redirect: None,
    requires_auth: Some(true),
};

const CV_UPLOAD: RouteDescriptor = RouteDescriptor {
    path: "/cv",
    name: Some("CVUpload"),
    view: Some("cv/CvUploadView"),
    redirect: None,
    requires_auth: Some(true),
};

const JOB_SEARCH: RouteDescriptor = RouteDescriptor {
    path: "/jobs",
    name: Some("JobSearch"),
    view: Some("jobs/JobSearchView"),
    redirect: None,
    requires_auth: Some(true),
};

const JOB_DETAIL: RouteDescriptor = RouteDescriptor {
    path: "/jobs/:id",
    name: Some("JobDetail"),
    view: Some("jobs/JobDetailView"),
    redirect: None,
    requires_auth: Some(true),
};

const MOTIVATION_LETTERS: RouteDescriptor = RouteDescriptor {
    path: "/motivation-letters",
    name: Some("MotivationLetters"),
    view: Some("motivation/MotivationListView"),
    redirect: None,
    requires_auth: Some(true),
};

const APPLICATIONS: RouteDescriptor = RouteDescriptor {
    path: "/applications",
    name: Some("Applications"),
    view: Some("applications/ApplicationsListView"),
    redirect: None,
    requires_auth: Some(true),
};

// Unmatched paths carry no metadata, so they fall under the default rule.
const NOT_FOUND: RouteDescriptor = RouteDescriptor {
    path: "/404",
    name: Some("NotFound"),
    view: None,
    redirect: None,
    requires_auth: None,
};

/// All routes, in declaration order
pub static ROUTES: &[RouteDescriptor] = &[
    ROOT,
    LOGIN,
    REGISTER,
    DASHBOARD,
    CV_UPLOAD,
    JOB_SEARCH,
    JOB_DETAIL,
    MOTIVATION_LETTERS,
    APPLICATIONS,
    NOT_FOUND,
];

impl Route {
    /// Match a location (query and fragment ignored); unknown paths are NotFound
    pub fn parse(location: &str) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .filter(|path| !path.is_empty())
            .unwrap_or("/");
        Self::recognize(path).unwrap_or(Self::NotFound)
    }

    pub fn descriptor(&self) -> &'static RouteDescriptor {
        match self {
            Self::Root => &ROOT,
            Self::Login => &LOGIN,
            Self::Register => &REGISTER,
            Self::Dashboard => &DASHBOARD,
            Self::CvUpload => &CV_UPLOAD,
            Self::JobSearch => &JOB_SEARCH,
            Self::JobDetail { .. } => &JOB_DETAIL,
            Self::MotivationLetters => &MOTIVATION_LETTERS,
            Self::Applications => &APPLICATIONS,
            Self::NotFound => &NOT_FOUND,
        }
    }

    pub fn requires_auth(&self) -> bool {
        self.descriptor().requires_auth()
    }
}
