//! Bundled content served when the backend cannot be reached.

use crate::model::{
    Certification, Education, Experience, PersonalInfo, PortfolioViewModel, Project, SkillCategory, Stat,
};

/// The full fallback dataset. Built fresh on every call.
pub fn default_dataset() -> PortfolioViewModel {
    PortfolioViewModel {
        stats: stats(),
        experience: experience(),
        projects: projects(),
        skills: skills(),
        education: education(),
        certifications: certifications(),
        personal_info: PersonalInfo::default(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn stat(value: &str, label: &str) -> Stat {
    Stat {
        value: value.to_string(),
        label: label.to_string(),
    }
}

fn stats() -> Vec<Stat> {
    vec![
        stat("3+", "Years Experience"),
        stat("15+", "Security Projects"),
        stat("8+", "Certifications"),
        stat("2", "Research Papers"),
    ]
}

fn experience() -> Vec<Experience> {
    vec![
        Experience {
            id: None,
            role: "Cybersecurity Intern".to_string(),
            company: "Catenactio Inc".to_string(),
            location: "Los Angeles, CA".to_string(),
            period: "May 2024 – Present".to_string(),
            highlights: strings(&[
                "Tuned SIEM rules (Wazuh) to reduce false positives and improve threat detection across enterprise clients, including environments with IT/OT segmentation",
                "Managed IAM (Okta) policies, automated provisioning/deprovisioning, and led user access reviews to enforce least privilege access",
                "Applied system hardening and patch management practices on Linux endpoints; implemented SSH security, logging, and audit controls aligned with OT-style hardening",
                "Authored IR plans, playbooks, and security policy documents aligned with SOC 2, NIST 800-53, and CIS Controls",
                "Researched integration of AI models for alert triage, contributing to early-stage automation of low-priority detection cases",
            ]),
            skills: strings(&[
                "SIEM",
                "Wazuh",
                "IAM",
                "Okta",
                "Linux Hardening",
                "Incident Response",
                "SOC 2",
                "NIST 800-53",
                "CIS Controls",
            ]),
        },
        Experience {
            id: None,
            role: "Research Assistant – AI Safety & Security".to_string(),
            company: "University at Buffalo".to_string(),
            location: "Buffalo, NY".to_string(),
            period: "Aug 2024 – Dec 2024".to_string(),
            highlights: strings(&[
                "Fine-tuned LLMs to detect adversarial prompts, hate speech, and toxic content, improved model classification accuracy and coverage",
                "Prompt-engineered secure inputs and outputs to reduce hallucinations and improve trustworthiness of GenAI responses",
                "Drafted internal guidelines for secure AI deployment and usage policies to reduce model risk exposure",
                "Contributed to cutting-edge research on adversarial machine learning and AI safety protocols",
            ]),
            skills: strings(&[
                "LLM Fine-tuning",
                "Prompt Engineering",
                "AI Safety",
                "Adversarial ML",
                "Python",
                "Machine Learning",
                "Research",
            ]),
        },
        Experience {
            id: None,
            role: "Associate Software Engineer".to_string(),
            company: "Bosch Global Software Technologies".to_string(),
            location: "Bengaluru, IN".to_string(),
            period: "Jan 2023 – Jun 2023".to_string(),
            highlights: strings(&[
                "Developed and tested embedded automotive software in compliance with MISRA C and cybersecurity standards",
                "Supported integration of functional safety protocols with discussions around vehicle cybersecurity and OTA update security",
                "Implemented secure coding practices for automotive control systems and contributed to threat modeling exercises",
                "Collaborated on automotive cybersecurity frameworks and security validation processes",
            ]),
            skills: strings(&[
                "Embedded Systems",
                "MISRA C",
                "Automotive Security",
                "Functional Safety",
                "OTA Security",
                "Threat Modeling",
            ]),
        },
    ]
}

fn projects() -> Vec<Project> {
    vec![
        Project {
            id: None,
            title: "Detection Engine".to_string(),
            status: "Published • GitHub & PyPI".to_string(),
            icon: "shield".to_string(),
            description: "CLI + Flask-based threat intelligence tool that detects VPNs, proxies, botnets, Tor nodes, and DDoS infrastructure using IP intelligence, ASN heuristics, and open-source threat feeds. Published on GitHub and PyPI with enterprise integration capabilities.".to_string(),
            tech: strings(&[
                "Python",
                "Flask",
                "IP Intelligence",
                "Threat Feeds",
                "CLI",
                "PyPI",
                "ASN Analysis",
            ]),
            github: true,
            demo: true,
        },
        Project {
            id: None,
            title: "LLM AutoSOC".to_string(),
            status: "In Development".to_string(),
            icon: "terminal".to_string(),
            description: "Developing a GenAI-powered security orchestration tool that triages logs, assigns alert severity, and maps incidents to the MITRE ATT&CK framework. Automates IR suggestions for security operations teams using advanced NLP and structured log analysis.".to_string(),
            tech: strings(&[
                "GenAI",
                "NLP",
                "MITRE ATT&CK",
                "Log Analysis",
                "Python",
                "Machine Learning",
                "SOAR",
            ]),
            github: true,
            demo: false,
        },
        Project {
            id: None,
            title: "ICS Lab Simulation".to_string(),
            status: "Completed".to_string(),
            icon: "server".to_string(),
            description: "Simulated an OT-style network using OpenPLC, ModbusPal, Wireshark, and pfSense to inspect industrial protocol traffic and explore IT/OT segmentation (Purdue model). Integrated Suricata for SCADA-focused threat detection rules.".to_string(),
            tech: strings(&[
                "OpenPLC",
                "ModbusPal",
                "Wireshark",
                "pfSense",
                "Suricata",
                "ICS Security",
                "SCADA",
                "Purdue Model",
            ]),
            github: true,
            demo: false,
        },
        Project {
            id: None,
            title: "Enterprise Homelab".to_string(),
            status: "Ongoing".to_string(),
            icon: "server".to_string(),
            description: "Comprehensive enterprise security simulation with pfSense firewall, Wazuh SIEM, and ELK stack. Advanced alert tuning, incident response drills, and security monitoring in a controlled environment with real-world attack scenarios.".to_string(),
            tech: strings(&[
                "pfSense",
                "Wazuh",
                "ELK Stack",
                "SIEM",
                "Security Monitoring",
                "IR Drills",
                "Log Management",
            ]),
            github: false,
            demo: false,
        },
        Project {
            id: None,
            title: "Secure Cloud VPN".to_string(),
            status: "Deployed".to_string(),
            icon: "shield".to_string(),
            description: "Deployed hardened WireGuard VPN on AWS EC2 with advanced security configurations. Implemented fail2ban, automated security updates, comprehensive logging, and monitoring with custom security policies.".to_string(),
            tech: strings(&[
                "WireGuard",
                "AWS EC2",
                "Linux Hardening",
                "VPN",
                "Cloud Security",
                "Fail2ban",
                "Monitoring",
            ]),
            github: true,
            demo: false,
        },
        Project {
            id: None,
            title: "Advanced CTF Labs".to_string(),
            status: "Continuous Learning".to_string(),
            icon: "bug".to_string(),
            description: "Comprehensive penetration testing and vulnerability research across TryHackMe, HackTheBox, and OverTheWire platforms. Documented attack vectors, defense strategies, and created custom exploitation tools and defense mechanisms.".to_string(),
            tech: strings(&[
                "Penetration Testing",
                "Vulnerability Research",
                "Linux",
                "Web Security",
                "Network Security",
                "Exploit Development",
            ]),
            github: false,
            demo: false,
        },
    ]
}

fn skills() -> Vec<SkillCategory> {
    vec![
        SkillCategory {
            id: None,
            category: "Security Engineering".to_string(),
            icon: "shield".to_string(),
            skills: strings(&[
                "SIEM (Wazuh, Splunk)",
                "SOAR Platforms",
                "MITRE ATT&CK",
                "EDR/XDR",
                "DLP Solutions",
                "FIM",
                "Antivirus Management",
                "Log Analysis",
                "Threat Hunting",
                "Alert Tuning",
            ]),
        },
        SkillCategory {
            id: None,
            category: "IAM & Compliance".to_string(),
            icon: "lock".to_string(),
            skills: strings(&[
                "Okta Administration",
                "RBAC",
                "MFA Implementation",
                "User Access Reviews",
                "SOC 2 Type II",
                "NIST 800-53",
                "CIS Controls",
                "ISO 27001",
                "ISA/IEC 62443",
                "NERC CIP",
            ]),
        },
        SkillCategory {
            id: None,
            category: "Cloud & Infrastructure".to_string(),
            icon: "server".to_string(),
            skills: strings(&[
                "AWS Security",
                "GCP",
                "Terraform",
                "Docker Security",
                "Linux Hardening",
                "SSH Security",
                "pfSense",
                "Security Groups",
                "VPC Design",
                "WAF Configuration",
            ]),
        },
        SkillCategory {
            id: None,
            category: "OT/ICS Security".to_string(),
            icon: "eye".to_string(),
            skills: strings(&[
                "OpenPLC",
                "ModbusPal",
                "SCADA Protocols",
                "Modbus/TCP",
                "DNP3",
                "IT/OT Segmentation",
                "Purdue Model",
                "Industrial Threat Modeling",
                "HMI Security",
            ]),
        },
        SkillCategory {
            id: None,
            category: "AI & Automation".to_string(),
            icon: "zap".to_string(),
            skills: strings(&[
                "Python Automation",
                "Bash Scripting",
                "LLM Fine-Tuning",
                "Prompt Engineering",
                "Adversarial Testing",
                "Alert Prioritization",
                "JSON/YAML",
                "Pandas",
                "Machine Learning",
            ]),
        },
        SkillCategory {
            id: None,
            category: "Security Tools".to_string(),
            icon: "code".to_string(),
            skills: strings(&[
                "Wireshark",
                "Metasploit",
                "Burp Suite",
                "Nmap",
                "Vulnerability Scanning",
                "Patch Management",
                "System Hardening",
                "OWASP Top 10",
                "Code Review",
                "OSINT",
            ]),
        },
    ]
}

fn education() -> Vec<Education> {
    vec![
        Education {
            id: None,
            degree: "Master of Science in Cybersecurity".to_string(),
            school: "University at Buffalo, SUNY".to_string(),
            location: "Buffalo, NY".to_string(),
            period: "Aug 2023 - Dec 2024".to_string(),
            gpa: "3.8/4.0".to_string(),
            coursework: strings(&[
                "Advanced Network Security",
                "AI Safety & Security",
                "Digital Forensics",
                "Cryptography",
                "Incident Response",
            ]),
        },
        Education {
            id: None,
            degree: "Bachelor of Engineering in Electronics and Instrumentation".to_string(),
            school: "Visvesvaraya Technological University".to_string(),
            location: "Bengaluru, IN".to_string(),
            period: "Aug 2018 - Jun 2022".to_string(),
            gpa: "8.5/10.0".to_string(),
            coursework: strings(&[
                "Embedded Systems",
                "Control Systems",
                "Industrial Automation",
                "Signal Processing",
            ]),
        },
    ]
}

fn certifications() -> Vec<Certification> {
    [
        "ISO/IEC 27001:2022 Lead Auditor",
        "Google Cybersecurity Certificate v2",
        "AWS Certified Cloud Practitioner",
        "(ISC)² Certified in Cybersecurity",
        "Google AI Essentials",
        "CompTIA Security+ (Scheduled Aug 2025)",
        "GIAC GISCP (Planned)",
        "AWS Security Specialty (Planned)",
    ]
    .into_iter()
    .map(|name| Certification::Bare(name.to_string()))
    .collect()
}
