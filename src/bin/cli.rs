use chrono::{Datelike, NaiveDate};
use polars::prelude::{AnyValue, DataFrame};
use resource_tracker::{
    LeaveType, Project, Resource, ResourceLeave, Role, Tracker, load_allocations_from_csv,
    load_tracker_from_json, save_allocations_to_csv, save_tracker_to_json,
};
use std::io::{self, Write};

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    // Compute column widths
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let render_value = |av: &AnyValue, col_name: &str| -> String {
        match av {
            AnyValue::Null => String::new(),
            AnyValue::Int32(v) => v.to_string(),
            AnyValue::Int64(v) => v.to_string(),
            AnyValue::Float64(v) => format!("{v:.1}"),
            AnyValue::String(s) => s.to_string(),
            AnyValue::List(inner) if col_name == "resource_ids" => {
                if let Ok(ca) = inner.str() {
                    ca.into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(";")
                } else {
                    av.to_string()
                }
            }
            _ => av.to_string(),
        }
    };

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            if let Ok(ref av) = col.get(row_idx) {
                let s = render_value(av, col.name().as_str());
                if s.len() > widths[ci] {
                    widths[ci] = s.len();
                }
            }
        }
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    // Header
    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    // Rows
    for row_idx in 0..df.height() {
        out.push('|');
        for (ci, col) in columns.iter().enumerate() {
            let mut s = String::new();
            if let Ok(ref av) = col.get(row_idx) {
                s = render_value(av, col.name().as_str());
            }
            out.push(' ');
            out.push_str(&s);
            let pad = widths[ci].saturating_sub(s.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                                    Show this help\n  show                                    Show the allocation grid\n  roles                                   List roles\n  role <name>                             Add a role\n  resources                               List resources with derived status\n  res <code> <name> <role_id> [avail]     Add a resource (availability %)\n  projects                                List projects\n  project <code> <name>                   Add a project\n  alloc <proj_code> <role_id> <year> <month> <week> <planned> [actual]\n                                          Record hours for a grid slot\n  assign <proj_code> <res_code> <year> <month> [role_id]\n                                          Put a resource on all weeks of a month\n  delete <allocation_id>                  Delete a grid row\n  leave <res_code> <start> <end> [type]   Add a leave (YYYY-MM-DD dates)\n  leaves [res_code]                       List leaves\n  status <res_code>                       Show derived status for a resource\n  dashboard [<year> <month>]              Monthly breakdown (defaults to now)\n  overview                                Org-wide dashboard counters\n  code <name...>                          Suggest a project code\n  save <json|csv> <path>                  Persist tracker (csv: grid only)\n  load <json|csv> <path>                  Load tracker (csv merges grid rows)\n  quit|exit                               Exit"
    );
}

fn print_resource_line(tracker: &Tracker, resource: &Resource) {
    match tracker.resource_summary(&resource.id, today()) {
        Ok(Some(summary)) => {
            let projects = summary
                .current_projects
                .iter()
                .map(|p| format!("{} ({:.1}h)", p.code, p.planned_hours))
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "  {:<8} {:<20} {:<10} {:>4}%  {}",
                resource.code,
                resource.name,
                summary.status.as_str(),
                summary.workload_percent,
                projects
            );
        }
        Ok(None) => {}
        Err(e) => println!("Error deriving status for {}: {}", resource.code, e),
    }
}

fn parse_date_arg(input: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            println!("Invalid date (YYYY-MM-DD)");
            None
        }
    }
}

fn main() {
    let mut tracker = Tracker::new();

    println!("Resource Tracker (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => {
                print_help();
            }
            "quit" | "exit" => break,
            "show" => {
                println!("{}", render_df_as_text_table(tracker.dataframe()));
            }
            "roles" => {
                for role in tracker.roles() {
                    println!("  {:<10} {}", role.id, role.name);
                }
            }
            "role" => {
                let name: Vec<&str> = parts.collect();
                if name.is_empty() {
                    println!("Usage: role <name>");
                    continue;
                }
                let id = tracker.next_role_id();
                match tracker.upsert_role(Role::new(id.clone(), name.join(" "))) {
                    Ok(_) => println!("Added role {id}."),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "resources" => {
                let resources: Vec<Resource> = tracker.resources().to_vec();
                for resource in &resources {
                    print_resource_line(&tracker, resource);
                }
            }
            "res" => {
                let code_s = parts.next();
                let name_s = parts.next();
                let role_s = parts.next();
                let avail_s = parts.next();
                match (code_s, name_s, role_s) {
                    (Some(code), Some(name), Some(role_id)) => {
                        let availability: i64 = match avail_s.map(|s| s.parse::<i64>()) {
                            Some(Ok(v)) => v,
                            Some(Err(_)) => {
                                println!("Invalid availability");
                                continue;
                            }
                            None => 100,
                        };
                        let id = tracker.next_resource_id();
                        let resource = Resource::new(id.clone(), code, name, role_id)
                            .with_availability(availability);
                        match tracker.add_resource(resource) {
                            Ok(_) => println!("Added resource {id} ({code})."),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: res <code> <name> <role_id> [availability]"),
                }
            }
            "projects" => {
                for project in tracker.projects() {
                    println!(
                        "  {:<10} {:<10} {}{}",
                        project.id,
                        project.code,
                        project.name,
                        if project.is_archived { " (archived)" } else { "" }
                    );
                }
            }
            "project" => {
                let code_s = parts.next();
                let name: Vec<&str> = parts.collect();
                match code_s {
                    Some(code) if !name.is_empty() => {
                        let id = tracker.next_project_id();
                        match tracker.add_project(Project::new(id.clone(), code, name.join(" "))) {
                            Ok(_) => println!("Added project {id} ({code})."),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: project <code> <name>"),
                }
            }
            "alloc" => {
                let args: Vec<&str> = parts.collect();
                if args.len() < 6 {
                    println!(
                        "Usage: alloc <proj_code> <role_id> <year> <month> <week> <planned> [actual]"
                    );
                    continue;
                }
                let Some(project) = tracker.find_project_by_code(args[0]) else {
                    println!("Unknown project code {}", args[0]);
                    continue;
                };
                let project_id = project.id.clone();
                let role_id = args[1].to_string();
                let (year, month, week) = match (
                    args[2].parse::<i32>(),
                    args[3].parse::<u32>(),
                    args[4].parse::<u32>(),
                ) {
                    (Ok(y), Ok(m), Ok(w)) => (y, m, w),
                    _ => {
                        println!("Invalid year/month/week");
                        continue;
                    }
                };
                let planned = match args[5].parse::<f64>() {
                    Ok(v) => v,
                    Err(_) => {
                        println!("Invalid planned hours");
                        continue;
                    }
                };
                let actual = match args.get(6).map(|s| s.parse::<f64>()) {
                    Some(Ok(v)) => Some(v),
                    Some(Err(_)) => {
                        println!("Invalid actual hours");
                        continue;
                    }
                    None => None,
                };
                match tracker.record_hours(
                    &project_id,
                    &role_id,
                    year,
                    month,
                    week,
                    Some(planned),
                    actual,
                ) {
                    Ok(allocation) => {
                        println!("Recorded hours on {}.", allocation.id);
                        println!("{}", render_df_as_text_table(tracker.dataframe()));
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "assign" => {
                let args: Vec<&str> = parts.collect();
                if args.len() < 4 {
                    println!("Usage: assign <proj_code> <res_code> <year> <month> [role_id]");
                    continue;
                }
                let Some(project) = tracker.find_project_by_code(args[0]) else {
                    println!("Unknown project code {}", args[0]);
                    continue;
                };
                let Some(resource) = tracker.find_resource_by_code(args[1]) else {
                    println!("Unknown resource code {}", args[1]);
                    continue;
                };
                let project_id = project.id.clone();
                let resource_id = resource.id.clone();
                let (year, month) = match (args[2].parse::<i32>(), args[3].parse::<u32>()) {
                    (Ok(y), Ok(m)) => (y, m),
                    _ => {
                        println!("Invalid year/month");
                        continue;
                    }
                };
                match tracker.assign_resource(&project_id, &resource_id, year, month, args.get(4).copied())
                {
                    Ok(touched) => {
                        println!("Assigned {} across {} week slots.", args[1], touched.len());
                        println!("{}", render_df_as_text_table(tracker.dataframe()));
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "delete" => match parts.next() {
                Some(id) => match tracker.delete_allocation(id) {
                    Ok(true) => {
                        println!("Deleted allocation {id}.");
                        println!("{}", render_df_as_text_table(tracker.dataframe()));
                    }
                    Ok(false) => println!("Allocation {id} not found."),
                    Err(e) => println!("Error deleting allocation: {}", e),
                },
                None => println!("Usage: delete <allocation_id>"),
            },
            "leave" => {
                let args: Vec<&str> = parts.collect();
                if args.len() < 3 {
                    println!("Usage: leave <res_code> <start> <end> [type]");
                    continue;
                }
                let Some(resource) = tracker.find_resource_by_code(args[0]) else {
                    println!("Unknown resource code {}", args[0]);
                    continue;
                };
                let resource_id = resource.id.clone();
                let (Some(start), Some(end)) = (parse_date_arg(args[1]), parse_date_arg(args[2]))
                else {
                    continue;
                };
                let leave_type = match args.get(3) {
                    Some(raw) => match LeaveType::from_str(raw) {
                        Some(lt) => lt,
                        None => {
                            println!(
                                "Invalid leave type (expected one of: {})",
                                LeaveType::variants().join(", ")
                            );
                            continue;
                        }
                    },
                    None => LeaveType::Leave,
                };
                let id = tracker.next_leave_id();
                let mut leave = ResourceLeave::new(id.clone(), resource_id, start, end);
                leave.leave_type = leave_type;
                match tracker.add_leave(leave) {
                    Ok(_) => println!("Added leave {id}."),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "leaves" => {
                let filter = parts
                    .next()
                    .and_then(|code| tracker.find_resource_by_code(code))
                    .map(|r| r.id.clone());
                for leave in tracker.leaves() {
                    if let Some(ref resource_id) = filter {
                        if &leave.resource_id != resource_id {
                            continue;
                        }
                    }
                    println!(
                        "  {:<8} {:<10} {} .. {} ({})",
                        leave.id,
                        leave.resource_id,
                        leave.start_date,
                        leave.end_date,
                        leave.leave_type.as_str()
                    );
                }
            }
            "status" => match parts.next() {
                Some(code) => {
                    let Some(resource) = tracker.find_resource_by_code(code) else {
                        println!("Unknown resource code {code}");
                        continue;
                    };
                    match tracker.resource_summary(&resource.id.clone(), today()) {
                        Ok(Some(summary)) => {
                            println!("Resource : {} ({})", summary.resource.name, code);
                            println!("Status   : {}", summary.status.as_str());
                            println!("Workload : {}%", summary.workload_percent);
                            for project in &summary.current_projects {
                                println!(
                                    "Project  : {} {} ({:.1}h planned)",
                                    project.code, project.name, project.planned_hours
                                );
                            }
                            if let Some(leave) = &summary.current_leave {
                                println!(
                                    "On leave : {} .. {} ({})",
                                    leave.start_date,
                                    leave.end_date,
                                    leave.leave_type.as_str()
                                );
                            }
                            for leave in &summary.upcoming_leaves {
                                println!(
                                    "Upcoming : {} .. {} ({})",
                                    leave.start_date,
                                    leave.end_date,
                                    leave.leave_type.as_str()
                                );
                            }
                        }
                        Ok(None) => println!("Resource not found."),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                None => println!("Usage: status <res_code>"),
            },
            "dashboard" => {
                let now = today();
                let (year, month) = match (parts.next(), parts.next()) {
                    (Some(y), Some(m)) => match (y.parse::<i32>(), m.parse::<u32>()) {
                        (Ok(y), Ok(m)) => (y, m),
                        _ => {
                            println!("Invalid year/month");
                            continue;
                        }
                    },
                    _ => (now.year(), now.month()),
                };
                match tracker.dashboard_monthly(year, month) {
                    Ok(dashboard) => {
                        println!("Dashboard {}-{:02}", dashboard.year, dashboard.month);
                        for week in &dashboard.weekly_breakdown {
                            println!(
                                "  week {}: planned {:.1}h actual {:.1}h",
                                week.week, week.planned, week.actual
                            );
                        }
                        for project in &dashboard.project_breakdown {
                            println!(
                                "  {:<10} planned {:.1}h actual {:.1}h",
                                project.code, project.planned, project.actual
                            );
                        }
                        println!(
                            "  total: planned {:.1}h actual {:.1}h",
                            dashboard.total_planned, dashboard.total_actual
                        );
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "overview" => match tracker.dashboard_overview(today()) {
                Ok(overview) => {
                    println!("Projects   : {} ({} active)", overview.total_projects, overview.active_projects);
                    println!("Resources  : {}", overview.total_resources);
                    println!("Grid rows  : {}", overview.total_allocations);
                    println!(
                        "This month : planned {:.1}h actual {:.1}h utilization {}%",
                        overview.total_planned_hours,
                        overview.total_actual_hours,
                        overview.monthly_utilization
                    );
                }
                Err(e) => println!("Error: {}", e),
            },
            "code" => {
                let name: Vec<&str> = parts.collect();
                if name.is_empty() {
                    println!("Usage: code <name...>");
                    continue;
                }
                println!("{}", tracker.generate_project_code(&name.join(" "), None));
            }
            "save" => {
                let format_s = parts.next();
                let path_s = parts.next();
                match (format_s, path_s) {
                    (Some("json"), Some(path)) => match save_tracker_to_json(&tracker, path) {
                        Ok(_) => println!("Tracker saved to {path}."),
                        Err(e) => println!("Error saving tracker: {}", e),
                    },
                    (Some("csv"), Some(path)) => match save_allocations_to_csv(&tracker, path) {
                        Ok(_) => println!("Allocation grid saved to {path}."),
                        Err(e) => println!("Error saving grid: {}", e),
                    },
                    _ => println!("Usage: save <json|csv> <path>"),
                }
            }
            "load" => {
                let format_s = parts.next();
                let path_s = parts.next();
                match (format_s, path_s) {
                    (Some("json"), Some(path)) => match load_tracker_from_json(path) {
                        Ok(loaded) => {
                            tracker = loaded;
                            println!("Tracker loaded from {path}.");
                            println!("{}", render_df_as_text_table(tracker.dataframe()));
                        }
                        Err(e) => println!("Error loading tracker: {}", e),
                    },
                    (Some("csv"), Some(path)) => match load_allocations_from_csv(path) {
                        Ok(allocations) => {
                            let mut failed = false;
                            for allocation in allocations {
                                if let Err(e) = tracker.upsert_allocation_record(allocation) {
                                    println!("Error merging row: {}", e);
                                    failed = true;
                                    break;
                                }
                            }
                            if !failed {
                                println!("Allocation grid loaded from {path}.");
                                println!("{}", render_df_as_text_table(tracker.dataframe()));
                            }
                        }
                        Err(e) => println!("Error loading grid: {}", e),
                    },
                    _ => println!("Usage: load <json|csv> <path>"),
                }
            }
            other => {
                println!("Unknown command '{other}'. Type 'help' for commands.");
            }
        }
    }
}
